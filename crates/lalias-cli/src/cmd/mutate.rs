use lalias_core::command::Request;
use lalias_core::{AliasStore, AppendOutcome};

/// Apply one mutation in memory and describe what changed.
pub fn apply(store: &mut AliasStore, request: Request) -> anyhow::Result<String> {
    let summary = match request {
        Request::Append { name, lines } => {
            match store.append(name.as_bytes(), &lines)? {
                AppendOutcome::Created => format!("Created '{name}' with {}", plural(lines.len())),
                AppendOutcome::Extended => format!("Appended {} to '{name}'", plural(lines.len())),
            }
        }
        Request::Truncate { name, count } => match store.truncate(name.as_bytes(), count)? {
            0 => format!("Removed '{name}' (no lines left)"),
            remaining => format!("Truncated '{name}' to {}", plural(remaining)),
        },
        Request::Delete { name } => {
            store.delete(name.as_bytes())?;
            format!("Deleted '{name}'")
        }
        Request::Rename { name, new_name } => {
            store.rename(name.as_bytes(), new_name.as_bytes())?;
            format!("Renamed '{name}' to '{new_name}'")
        }
        Request::Overwrite { name, lines } => {
            store.overwrite(name.as_bytes(), &lines)?;
            format!("Replaced '{name}' with {}", plural(lines.len()))
        }
        other => anyhow::bail!("not a store mutation: {other:?}"),
    };
    Ok(summary)
}

fn plural(n: usize) -> String {
    if n == 1 {
        "1 line".to_string()
    } else {
        format!("{n} lines")
    }
}
