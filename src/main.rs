use anyhow::{Result, anyhow, bail};
use std::path::PathBuf;
use std::process::ExitCode;

use pwshell::shell::ShellConfig;
use pwshell::shell::commands::read_new_password;
use pwshell::{AccountDb, AppConfig, ErrorKind, Shell, VaultEngine, init_logging};

/// Opens the database at the configured path, creating it when missing.
fn open_db(config: &AppConfig) -> Result<AccountDb> {
    let mut db = AccountDb::new(&config.db_path, Box::new(VaultEngine::new()))
        .with_read_only(config.read_only);

    if !db.exists() {
        if config.read_only {
            bail!("{} does not exist", config.db_path.display());
        }
        println!("Creating a new database at {}", config.db_path.display());
        let mut password = read_new_password(|text: &str| rpassword::prompt_password(text))
            .map_err(|msg| anyhow!(msg))?;
        db.set_password(std::mem::take(&mut *password));
        db.write()?;
        log::info!("Created database {}", config.db_path.display());
        return Ok(db);
    }

    db.set_password(rpassword::prompt_password("Master password: ")?);

    match db.read() {
        Ok(count) => {
            log::info!("Loaded {} records from {}", count, config.db_path.display());
            Ok(db)
        }
        Err(e) => {
            let hint = match e.kind() {
                ErrorKind::WrongPassword => "check the master password",
                ErrorKind::CorruptOrUnreadable => "the file may be damaged or not a pwshell database",
                ErrorKind::NotFound => "the file disappeared while opening",
                _ => "see the log for details",
            };
            log::error!("Failed to open database: {}", e);
            bail!("{} ({})", e, hint)
        }
    }
}

fn run() -> Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.db_path = PathBuf::from(path);
    }
    init_logging(&config.log)?;
    log::info!("Starting pwshell {}", env!("CARGO_PKG_VERSION"));

    let mut db = open_db(&config)?;
    let shell = Shell::with_config(ShellConfig {
        history: config.history.clone(),
        show_welcome: true,
    });

    let result = shell.run(&mut db);
    db.clear_password();
    result
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
