#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Fail to create initial connection: `{0}`")]
    InitConn(sea_orm::DbErr),
    #[error("Fail to optimize database: `{0}`")]
    OptimizeDB(sea_orm::DbErr),
    #[error("Fail to run auto migration: `{0}`")]
    AutoMigrate(sea_orm::DbErr),
    #[error("Fail to create database dictionary: `{0}`")]
    DatabaseDir(std::io::Error),
    #[error("Fail to create config dictionary: `{0}`")]
    ConfigDir(std::io::Error),
    #[error("Fail to parse config: `{0}`")]
    ConfigParse(toml::de::Error),
    #[error("Fail to serialize config: `{0}`")]
    ConfigSerialize(toml::ser::Error),
    #[error("Fail to read config: `{0}`")]
    ConfigRead(std::io::Error),
    #[error("Fail to write config: `{0}`")]
    ConfigWrite(std::io::Error),
    #[error("Fail to bind `{0}`: `{1}`")]
    Bind(String, std::io::Error),
}
