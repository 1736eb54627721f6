use crate::catalog;

/// Whether `candidate` is emphasised while `selected` is the selected sign key.
///
/// True for the selected sign itself and for its catalog opposite. Keys that
/// are not in the catalog only ever match themselves.
pub fn is_highlighted(selected: Option<&str>, candidate: &str) -> bool {
    let Some(selected) = selected else {
        return false;
    };
    if candidate == selected {
        return true;
    }
    catalog::lookup(selected)
        .map(|sign| sign.opposite.as_ref() == candidate)
        .unwrap_or(false)
}
