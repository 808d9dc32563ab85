//! Property modifier keywords

use crate::model::{ObjectFlags, Property, PropertyFlags};

/// Keyword, the flag that enables it, and the flag that suppresses it
const MODIFIERS: &[(&str, PropertyFlags, PropertyFlags)] = &[
    ("const", PropertyFlags::CONST, PropertyFlags::empty()),
    ("input", PropertyFlags::INPUT, PropertyFlags::empty()),
    ("export", PropertyFlags::EXPORT_OBJECT, PropertyFlags::empty()),
    ("optional", PropertyFlags::OPTIONAL_PARM, PropertyFlags::empty()),
    ("out", PropertyFlags::OUT_PARM, PropertyFlags::empty()),
    ("skip", PropertyFlags::SKIP_PARM, PropertyFlags::empty()),
    ("coerce", PropertyFlags::COERCE_PARM, PropertyFlags::empty()),
    ("native", PropertyFlags::NATIVE, PropertyFlags::empty()),
    ("transient", PropertyFlags::TRANSIENT, PropertyFlags::empty()),
    ("globalconfig", PropertyFlags::GLOBAL_CONFIG, PropertyFlags::empty()),
    ("config", PropertyFlags::CONFIG, PropertyFlags::GLOBAL_CONFIG),
    ("localized", PropertyFlags::LOCALIZED, PropertyFlags::empty()),
    ("travel", PropertyFlags::TRAVEL, PropertyFlags::empty()),
    ("editconst", PropertyFlags::EDIT_CONST, PropertyFlags::empty()),
    ("editinlineuse", PropertyFlags::EDIT_INLINE_USE, PropertyFlags::empty()),
    ("editinline", PropertyFlags::EDIT_INLINE, PropertyFlags::EDIT_INLINE_USE),
    ("edfindable", PropertyFlags::ED_FINDABLE, PropertyFlags::empty()),
    ("deprecated", PropertyFlags::DEPRECATED, PropertyFlags::empty()),
    ("editinlinenotify", PropertyFlags::EDIT_INLINE_NOTIFY, PropertyFlags::empty()),
];

/// `(Category)` for editable properties; empty parentheses when the
/// category is the owning container's name
pub fn category(property: &Property, container: &str) -> Option<String> {
    if !property.flags.contains(PropertyFlags::EDIT) {
        return None;
    }
    let category = match &property.category {
        Some(category) if !category.eq_ignore_ascii_case(container) => category.as_str(),
        _ => "",
    };
    Some(format!("({})", category))
}

/// Modifier keywords in declaration order
pub fn modifiers(property: &Property) -> Vec<&'static str> {
    let mut words = Vec::new();
    if property.object_flags.contains(ObjectFlags::PRIVATE) {
        words.push("private");
    }
    let flags = property.flags;
    for (word, flag, suppressed_by) in MODIFIERS {
        let suppressed = suppressed_by.bits() != 0 && flags.contains(*suppressed_by);
        if flags.contains(*flag) && !suppressed {
            words.push(*word);
        }
    }
    words
}
