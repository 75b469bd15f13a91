use anyhow::Result;
use std::env;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub reservation: ReservationConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST")?,
            port: env::var("DATABASE_PORT")?.parse()?,
            username: env::var("DATABASE_USERNAME")?,
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: env::var("REDIS_HOST")?,
            port: env::var("REDIS_PORT")?.parse()?,
        };
        let auth = AuthConfig {
            ttl: env::var("AUTH_TOKEN_TTL")?.parse()?,
        };
        let reservation = ReservationConfig::from_env();
        Ok(Self {
            database,
            redis,
            auth,
            reservation,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

/// 予約作成時のポリシー設定
#[derive(Debug, Clone)]
pub struct ReservationConfig {
    /// APPROVED の予約と時間帯が重なる予約作成を拒否するかどうか。
    /// false の場合は警告ログのみ出して予約を受け付ける。
    pub reject_conflicting: bool,
}

impl ReservationConfig {
    pub fn from_env() -> Self {
        let reject_conflicting = env::var("RESERVATION_REJECT_CONFLICTING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);
        Self { reject_conflicting }
    }
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            reject_conflicting: true,
        }
    }
}
