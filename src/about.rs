pub const DISCRETE_DISPLAY_VERSION: &str = env!("DISCRETE_DISPLAY_VERSION");
pub const DISCRETE_BUILD_N: &str = env!("DISCRETE_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "Discrete Lab {}\nBuild {}\nNumber bases, finite sets, searching and sorting, step by step",
        DISCRETE_DISPLAY_VERSION, DISCRETE_BUILD_N
    )
}
