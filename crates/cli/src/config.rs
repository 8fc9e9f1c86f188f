//! Startup configuration: flags with environment-variable fallbacks.

use std::path::PathBuf;

use clap::Args;
use db::DbError;

/// Where the MySQL database lives.
///
/// `DATABASE_URL` wins when set; otherwise the discrete `DB_*` settings are
/// used.
#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    #[arg(long, env = "DB_USER", default_value = "root")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    #[arg(long, env = "DB_NAME", default_value = "labor_management")]
    pub db_name: String,

    /// Pool ceiling; requests wait for a free connection beyond it.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,
}

impl DbArgs {
    pub fn connect_options(&self) -> Result<db::pool::MySqlConnectOptions, DbError> {
        match &self.database_url {
            Some(url) => db::pool::options_from_url(url),
            None => Ok(db::pool::connect_options(
                &self.db_host,
                self.db_port,
                &self.db_user,
                &self.db_password,
                &self.db_name,
            )),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Static frontend served for every non-API path.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Keep everything in process memory instead of MySQL (lost on exit).
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

impl ServeArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn flags_override_defaults() {
        let w = Wrapper::parse_from([
            "test",
            "--port",
            "8081",
            "--host",
            "127.0.0.1",
            "--db-name",
            "ledger",
            "--max-connections",
            "4",
            "--in-memory",
        ]);
        assert_eq!(w.serve.bind_addr(), "127.0.0.1:8081");
        assert_eq!(w.serve.db.db_name, "ledger");
        assert_eq!(w.serve.db.max_connections, 4);
        assert!(w.serve.in_memory);
    }

    #[test]
    fn database_url_takes_precedence() {
        let w = Wrapper::parse_from([
            "test",
            "--database-url",
            "mysql://app:pw@db.internal:3307/ledger",
            "--db-host",
            "ignored",
        ]);
        let opts = w.serve.db.connect_options().unwrap();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 3307);
    }
}
