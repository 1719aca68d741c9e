mod invoke;
mod list;
mod mutate;

use anyhow::Context;
use lalias_core::command::{Flag, Request};
use lalias_core::paths::store_path;
use lalias_core::AliasStore;
use std::path::Path;

/// Load the store, run one request against it, and rewrite the store when
/// the request mutated it.
pub fn run(root: &Path, tokens: &[String], json: bool) -> anyhow::Result<()> {
    let (tokens, json) = match strip_trailing_json(tokens) {
        Some(stripped) => (stripped, true),
        None => (tokens.to_vec(), json),
    };
    let request = Request::parse(&tokens)?;
    tracing::debug!(?request, "parsed command");

    let mut store = AliasStore::load(root)
        .with_context(|| format!("failed to load {}", store_path(root).display()))?;

    match request {
        Request::Noop => Ok(()),
        Request::List => list::run(&store, json),
        Request::Invoke { name, args } => invoke::run(&store, &name, &args),
        mutation => {
            debug_assert!(mutation.is_mutation());
            let summary = mutate::apply(&mut store, mutation)?;
            store
                .save(root)
                .with_context(|| format!("failed to rewrite {}", store_path(root).display()))?;
            println!("{summary}");
            Ok(())
        }
    }
}

/// `lal --list --json` puts `--json` among the raw tokens because everything
/// after the first token is captured verbatim. For a listing, lift it back out.
fn strip_trailing_json(tokens: &[String]) -> Option<Vec<String>> {
    let (first, rest) = tokens.split_first()?;
    let is_list = first
        .strip_prefix('-')
        .is_some_and(|contents| matches!(Flag::from_contents(contents), Ok(Flag::List)));
    if !is_list || !rest.iter().any(|t| t == "--json") {
        return None;
    }
    let mut stripped = vec![first.clone()];
    stripped.extend(rest.iter().filter(|t| *t != "--json").cloned());
    Some(stripped)
}
