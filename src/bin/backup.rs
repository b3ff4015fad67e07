use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use touchline_terminal::store::Store;

/// Command-line backup of the whole data store, for coaches who want a copy
/// off the device: `backup export team.json` / `backup import team.json`.
fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let (command, path) = match args.as_slice() {
        [command, path] => (command.as_str(), PathBuf::from(path)),
        _ => return Err(anyhow!("usage: backup <export|import> <path>")),
    };

    let mut store = Store::open_default();
    match command {
        "export" => {
            let doc = store.export_backup()?;
            fs::write(&path, doc)
                .with_context(|| format!("write backup to {}", path.display()))?;
            println!("Backup written to {}", path.display());
            println!("Keys: {}", store.snapshot().len());
        }
        "import" => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read backup from {}", path.display()))?;
            store.import_backup(&raw)?;
            println!("Backup imported from {}", path.display());
            for (key, value) in store.snapshot() {
                let count = value.as_array().map(|a| a.len().to_string());
                println!("  {key}: {}", count.as_deref().unwrap_or("1 record"));
            }
        }
        other => return Err(anyhow!("unknown command {other}, expected export or import")),
    }

    Ok(())
}
