//! Flag words carried by declarations
//!
//! The bit values are the ones the compiler writes into the package, so a
//! model provider can copy them straight from the binary tables.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

macro_rules! flag_word {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $flag:ident = $value:expr,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            $($(#[$fmeta])* pub const $flag: $name = $name($value);)*

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn bits(self) -> u32 {
                self.0
            }

            /// True when every bit of `other` is set
            pub const fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl BitOr for $name {
            type Output = $name;

            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }
    };
}

flag_word! {
    /// Property flags (`CPF_*`)
    PropertyFlags {
        EDIT = 0x0000_0001,
        CONST = 0x0000_0002,
        INPUT = 0x0000_0004,
        EXPORT_OBJECT = 0x0000_0008,
        OPTIONAL_PARM = 0x0000_0010,
        NET = 0x0000_0020,
        EDIT_CONST_ARRAY = 0x0000_0040,
        PARM = 0x0000_0080,
        OUT_PARM = 0x0000_0100,
        SKIP_PARM = 0x0000_0200,
        RETURN_PARM = 0x0000_0400,
        COERCE_PARM = 0x0000_0800,
        NATIVE = 0x0000_1000,
        TRANSIENT = 0x0000_2000,
        CONFIG = 0x0000_4000,
        LOCALIZED = 0x0000_8000,
        TRAVEL = 0x0001_0000,
        EDIT_CONST = 0x0002_0000,
        GLOBAL_CONFIG = 0x0004_0000,
        EDIT_INLINE = 0x0400_0000,
        ED_FINDABLE = 0x0800_0000,
        EDIT_INLINE_USE = 0x1000_0000,
        DEPRECATED = 0x2000_0000,
        EDIT_INLINE_NOTIFY = 0x4000_0000,
    }
}

flag_word! {
    /// Function flags (`FUNC_*`)
    FunctionFlags {
        FINAL = 0x0000_0001,
        DEFINED = 0x0000_0002,
        ITERATOR = 0x0000_0004,
        LATENT = 0x0000_0008,
        PRE_OPERATOR = 0x0000_0010,
        SINGULAR = 0x0000_0020,
        NET = 0x0000_0040,
        NET_RELIABLE = 0x0000_0080,
        SIMULATED = 0x0000_0100,
        EXEC = 0x0000_0200,
        NATIVE = 0x0000_0400,
        EVENT = 0x0000_0800,
        OPERATOR = 0x0000_1000,
        STATIC = 0x0000_2000,
    }
}

flag_word! {
    /// Object flags (`RF_*`) of a package entry
    ObjectFlags {
        TRANSACTIONAL = 0x0000_0001,
        PUBLIC = 0x0000_0004,
        PRIVATE = 0x0000_0080,
        STANDALONE = 0x0008_0000,
    }
}
