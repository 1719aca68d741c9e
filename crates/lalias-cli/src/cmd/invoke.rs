use lalias_core::executor::{self, SystemShell};
use lalias_core::AliasStore;

pub fn run(store: &AliasStore, name: &str, args: &[String]) -> anyhow::Result<()> {
    let mut shell = SystemShell;
    let ran = executor::invoke(store, name.as_bytes(), args, &mut shell)?;
    tracing::debug!(alias = name, lines = ran, "invocation finished");
    Ok(())
}
