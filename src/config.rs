use std::env;

// Validação estrutural dos blocos fica desligada por padrão.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyPolicy {
    #[default]
    Permissive,
    Strict,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub upload_dir: String,
    pub port: u16,
    pub body_policy: BodyPolicy,
}

impl Config {
    pub fn init() -> Config {
        let supabase_url =
            env::var("SUPABASE_URL").expect("🔒 SUPABASE_URL environment variable must be set!");
        let supabase_anon_key = env::var("SUPABASE_ANON_KEY")
            .expect("🔒 SUPABASE_ANON_KEY environment variable must be set!");

        if supabase_url.is_empty() || supabase_anon_key.is_empty() {
            panic!("🔒 Supabase credentials cannot be empty!");
        }

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(3001);
        let body_policy = match env::var("BLOCK_VALIDATION").as_deref() {
            Ok("strict") => BodyPolicy::Strict,
            _ => BodyPolicy::Permissive,
        };

        Config {
            supabase_url,
            supabase_anon_key,
            upload_dir,
            port,
            body_policy,
        }
    }
}
