//! Splits a long run of items into outbound message chunks that respect the
//! transport's hard per-message length ceiling. Used for broadcast pings
//! (items are member mentions) and for listing registrations (items are FSA
//! codes); the mechanism only cares about string items and a length ceiling.

/// Builds chunks of space-separated `items`, each chunk starting from
/// `prefix`.
///
/// A chunk is flushed before appending an item that would push it past
/// `max_len`, and a trailing chunk longer than the bare prefix is always
/// emitted. No items means no chunks, so callers can tell "no one to notify"
/// apart from a successful send. An item too large to fit even a fresh chunk
/// is still appended there so the sequence always drains; the oversize send
/// is the transport's problem, not an infinite loop.
pub fn build_chunks<I, S>(prefix: &str, items: I, max_len: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut chunks = Vec::new();
    let mut current = String::from(prefix);
    for item in items {
        let item = item.as_ref();
        let has_items = current.len() > prefix.len();
        if has_items && current.len() + 1 + item.len() > max_len {
            chunks.push(std::mem::replace(&mut current, String::from(prefix)));
        }
        if current.len() > prefix.len() {
            current.push(' ');
        }
        current.push_str(item);
    }
    if current.len() > prefix.len() {
        chunks.push(current);
    }
    chunks
}
