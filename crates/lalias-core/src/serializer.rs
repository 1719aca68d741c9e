use crate::parser::END_SENTINEL;
use crate::store::{AliasNode, AliasStore};

/// Render a store in the canonical `.lal` format.
pub fn serialize(store: &AliasStore) -> Vec<u8> {
    let mut out = Vec::new();
    for node in store.iter() {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut Vec<u8>, node: &AliasNode) {
    out.extend_from_slice(node.name());
    out.push(b':');
    for line in node.lines() {
        out.push(b'{');
        line.write_text(out);
        out.push(b'}');
    }
    out.extend_from_slice(END_SENTINEL);
    out.push(b'\n');
}
