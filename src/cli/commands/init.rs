use crate::cli::commands::audit;
use crate::cli::parser::{Cli, Commands};
use crate::config::{Config, RemoteKind};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::SqliteRemote;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the local SQLite database (cache + audit log) and its migrations
///  - with `--remote`, the shared SQLite file configured as remote
pub fn handle(cli: &Cli) -> AppResult<()> {
    let with_remote = matches!(cli.command, Commands::Init { remote: true });

    //
    // 1️⃣ PREPARA CONFIGURAZIONE
    //
    // In test mode the config file is not written: the returned config
    // carries the resolved database path.
    //
    let cfg: Config = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing hoflow…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ DB LOCALE (tabelle + migrazioni)
    //
    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;
    success(format!("Database initialized at {}", &db_path));

    //
    // 3️⃣ REMOTE (opzionale)
    //
    if with_remote {
        match (cfg.remote.kind, &cfg.remote.path) {
            (RemoteKind::Sqlite, Some(path)) => {
                SqliteRemote::provision(path)?;
                success(format!("Shared remote database ready at {path}"));
            }
            (RemoteKind::Sqlite, None) => {
                warning("remote.kind is sqlite but remote.path is missing in the configuration.");
            }
            (RemoteKind::Postgrest, _) => {
                info("PostgREST remote: the house_officers table is managed on the server.");
            }
            (RemoteKind::None, _) => {
                info("No remote store configured: running on the local cache only.");
            }
        }
    }

    //
    // 4️⃣ LOG INTERNO (non bloccante)
    //
    audit(
        &cfg,
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 hoflow initialization completed!");
    Ok(())
}
