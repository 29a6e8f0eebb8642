//! Compiled, cached encoding of reflected Rust values.
//!
//! - [`reflect`]: type descriptors, `#[derive(Reflect)]`, and the std impls.
//! - [`encode`](mod@encode): the compiler, procedure cache, pools and [`Engine`](encode::Engine).
//! - [`ptr`], [`os`], [`utils`]: the low-level pieces both are built on.
//!
//! ```
//! use vc_marshal::reflect::derive::Reflect;
//!
//! #[derive(Reflect)]
//! struct Pair(u8, String);
//!
//! let out = vc_marshal::encode(&Pair(1, "x".into())).unwrap();
//! assert_eq!(out, br#"{1"x"}"#);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_encode as encode;
pub use vc_os as os;
pub use vc_ptr as ptr;
pub use vc_reflect as reflect;
pub use vc_utils as utils;

pub use vc_encode::encode;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    extern crate alloc;
    extern crate std;

    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use crate::encode::{Engine, EngineConfig};
    use crate::reflect::derive::Reflect;

    #[derive(Reflect)]
    struct Inventory {
        owner: String,
        slots: [u16; 3],
        items: BTreeMap<String, u32>,
        tags: Option<Vec<&'static str>>,
        stash: Option<Box<HashMap<u8, i8>>>,
    }

    #[test]
    fn nested_value_through_umbrella_paths() {
        let engine = Engine::with_config(EngineConfig::default()).unwrap();
        let value = Inventory {
            owner: String::from("zoë"),
            slots: [1, 2, 3],
            items: BTreeMap::from([(String::from("axe"), 1), (String::from("rope"), 20)]),
            tags: None,
            stash: Some(Box::new(HashMap::from([(7, -7)]))),
        };

        assert_eq!(
            engine.encode_to_string(&value).unwrap(),
            r#"{"zoë"[1,2,3,]{"axe":1,"rope":20,}null{7:-7,}}"#
        );
    }

    #[test]
    fn map_output_is_json_after_trailing_commas() {
        let map: HashMap<String, i64> =
            (0..10).map(|i| (alloc::format!("k{i}"), i * 100)).collect();

        let encoded = String::from_utf8(crate::encode(&map).unwrap()).unwrap();
        let parsed: HashMap<String, i64> =
            serde_json::from_str(&encoded.replace(",}", "}")).unwrap();
        assert_eq!(parsed, map);
    }
}
