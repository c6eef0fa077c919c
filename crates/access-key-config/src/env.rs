pub const DEFAULT_STORE_PATH: &str = "access-key-config-storage";

pub struct EnvironmentVar {
    pub store_path: String,
    pub link_base: String,
}

impl EnvironmentVar {
    /// Read `ACCESS_KEY_STORE` and `ACCESS_KEY_LINK_BASE`, falling back to
    /// defaults. Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn load() -> Self {
        let store_path = dotenv::var("ACCESS_KEY_STORE")
            .unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());

        let link_base = dotenv::var("ACCESS_KEY_LINK_BASE")
            .unwrap_or_default();

        Self { store_path, link_base }
    }
}
