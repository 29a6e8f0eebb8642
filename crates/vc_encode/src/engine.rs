use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use vc_os::sync::{Arc, LazyLock};
use vc_reflect::info::TypeInfo;
use vc_reflect::{Reflect, type_and_ptr_of};

use crate::buffer::Buffer;
use crate::cache::ProcedureCache;
use crate::compiler::Compiler;
use crate::config::EngineConfig;
use crate::cursor::CursorRecycle;
use crate::error::{CompileError, ConfigError, EncodeError};
use crate::pool::{BufferRecycle, Pool};
use crate::procedure::Procedure;

// -----------------------------------------------------------------------------
// Engine

/// An encoder with its own procedure cache and pools.
///
/// Engines are independent of each other. [`Engine::global`] is a shared
/// instance for callers that do not need their own.
///
/// # Examples
///
/// ```
/// use vc_encode::Engine;
/// use vc_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let engine = Engine::new();
/// assert_eq!(engine.encode(&Point { x: 1, y: -2 }).unwrap(), b"{1-2}");
/// assert_eq!(engine.encode_to_string(&vec![1u8, 2]).unwrap(), "[1,2,]");
/// assert_eq!(engine.cached_types(), 2);
/// ```
pub struct Engine {
    cache: ProcedureCache,
    compiler: Compiler,
    buffers: Pool<Buffer, BufferRecycle>,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the default [`EngineConfig`].
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Creates an engine from a configuration, checking it first.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let cursors = Pool::new(
            config.cursor_pool_size,
            CursorRecycle::new(config.max_pooled_cursor_entries),
        );
        let buffers = Pool::new(
            config.buffer_pool_size,
            BufferRecycle::new(
                config.initial_buffer_capacity,
                config.max_pooled_buffer_capacity,
            ),
        );

        Self {
            cache: ProcedureCache::new(),
            compiler: Compiler::new(Arc::new(cursors), config.max_depth),
            buffers,
            config,
        }
    }

    /// Returns the process-wide engine, created on first use.
    pub fn global() -> &'static Engine {
        static GLOBAL: LazyLock<Engine> = LazyLock::new(Engine::new);
        &GLOBAL
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the procedure of the type described by `info`, compiling it on
    /// the first request.
    #[inline]
    pub fn procedure_for(&self, info: &'static TypeInfo) -> Result<Procedure, CompileError> {
        self.cache.get_or_compile(info, &self.compiler)
    }

    /// Encodes `value` into a new byte vector.
    ///
    /// The output buffer comes from the engine's pool and goes back to it on
    /// every path, the returned vector is an exact-length copy of its content.
    /// Nothing is returned on error.
    ///
    /// A value whose descriptor belongs to another type is rejected with
    /// [`CompileError::DescriptorMismatch`] before any of its memory is read.
    pub fn encode(&self, value: &dyn Reflect) -> Result<Vec<u8>, EncodeError> {
        let (info, ptr) = type_and_ptr_of(value);
        if info.type_id() != value.reflect_type_id() {
            return Err(CompileError::DescriptorMismatch {
                type_path: info.type_path(),
            }
            .into());
        }
        let procedure = self.procedure_for(info)?;

        let mut buf = self.buffers.acquire();
        // SAFETY: `procedure` was compiled for the type of `value`, and `ptr`
        // borrows `value` for this whole call.
        unsafe { procedure.call(&mut buf, ptr)? };
        Ok(buf.to_vec())
    }

    /// Like [`encode`](Self::encode), returning a `String`.
    ///
    /// Encoded output is always valid UTF-8: strings are copied from `str`
    /// and everything else is ASCII.
    pub fn encode_to_string(&self, value: &dyn Reflect) -> Result<String, EncodeError> {
        let bytes = self.encode(value)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// Returns the number of types with a cached procedure.
    #[inline]
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    /// Returns the number of idle buffers in the pool.
    #[inline]
    pub fn idle_buffers(&self) -> usize {
        self.buffers.idle()
    }

    /// Returns the number of idle map cursors in the pool.
    #[inline]
    pub fn idle_cursors(&self) -> usize {
        self.compiler.cursors().idle()
    }
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("cache", &self.cache)
            .field("buffers", &self.buffers)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeSet;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::mem::offset_of;
    use std::collections::HashMap;
    use std::thread;

    use vc_reflect::derive::Reflect;
    use vc_reflect::impls::NonGenericTypeInfoCell;
    use vc_reflect::info::{MapInfo, NamedField, ReflectKind, StructInfo, TypeInfo, Typed};
    use vc_reflect::ops::Map;

    use super::Engine;
    use crate::config::EngineConfig;
    use crate::error::{CompileError, ConfigError, EncodeError};

    #[derive(Reflect)]
    struct Int {
        i: isize,
    }

    #[derive(Reflect)]
    struct Text {
        s: String,
    }

    #[derive(Reflect)]
    struct Record {
        id: u32,
        name: String,
        scores: Vec<i16>,
        attrs: HashMap<String, u8>,
        extra: Option<Box<HashMap<u8, u8>>>,
    }

    #[derive(Reflect)]
    struct Callback {
        f: fn(u8) -> u8,
    }

    /// Splits `{k:v,k:v,}` into its entries, order-insensitive.
    fn entries(encoded: &str) -> BTreeSet<String> {
        let inner = encoded
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix(",}"))
            .unwrap();
        inner.split(',').map(ToString::to_string).collect()
    }

    #[test]
    fn end_to_end_examples() {
        let engine = Engine::new();

        assert_eq!(engine.encode(&Int { i: 10 }).unwrap(), b"{10}");
        assert_eq!(
            engine.encode(&Vec::from([5isize, 4, 3, 2, 1])).unwrap(),
            b"[5,4,3,2,1,]"
        );
        assert_eq!(
            engine.encode_to_string(&Text { s: String::from("a\"b") }).unwrap(),
            r#"{"a\"b"}"#
        );

        let one = HashMap::from([(String::from("one"), 1isize)]);
        assert_eq!(engine.encode_to_string(&one).unwrap(), r#"{"one":1,}"#);
    }

    #[test]
    fn maps_compare_as_sets() {
        let engine = Engine::new();
        let map: HashMap<String, i32> = (0..32).map(|i| (i.to_string(), -i)).collect();

        let encoded = engine.encode_to_string(&map).unwrap();
        let got = entries(&encoded);
        let expected: BTreeSet<String> = (0..32).map(|i| alloc::format!("\"{i}\":{}", -i)).collect();

        assert_eq!(got.len(), map.len());
        assert_eq!(got, expected);

        // Same entries on every call, in whatever order the map yields them.
        for _ in 0..4 {
            assert_eq!(entries(&engine.encode_to_string(&map).unwrap()), expected);
        }
    }

    #[test]
    fn map_output_parses_back() {
        let engine = Engine::new();
        let map = HashMap::from([(String::from("x"), 1u8), (String::from("y\n"), 2)]);

        let encoded = engine.encode_to_string(&map).unwrap();
        let json = encoded.replace(",}", "}");
        let parsed: HashMap<String, u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn null_and_empty() {
        let engine = Engine::new();
        assert_eq!(engine.encode(&None::<Vec<u8>>).unwrap(), b"null");
        assert_eq!(engine.encode(&Vec::<u8>::new()).unwrap(), b"[]");
        assert_eq!(engine.encode(&HashMap::<u8, u8>::new()).unwrap(), b"{}");
        assert_eq!(engine.encode(&None::<Box<HashMap<u8, u8>>>).unwrap(), b"null");
    }

    #[test]
    fn record_round() {
        let engine = Engine::new();
        let record = Record {
            id: 3,
            name: String::from("tab\there"),
            scores: Vec::from([-1, 0, 1]),
            attrs: HashMap::from([(String::from("k"), 9)]),
            extra: Some(Box::new(HashMap::from([(1, 2)]))),
        };

        assert_eq!(
            engine.encode_to_string(&record).unwrap(),
            r#"{3"tab\there"[-1,0,1,]{"k":9,}{1:2,}}"#
        );
    }

    #[test]
    fn unsupported_type_is_an_error() {
        fn double(x: u8) -> u8 {
            x * 2
        }

        let engine = Engine::new();
        let err = engine.encode(&Callback { f: double }).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Unsupported(CompileError::UnsupportedType {
                kind: ReflectKind::Opaque,
                ..
            })
        ));
        assert_eq!(engine.cached_types(), 0);
        assert!(engine.encode(&true).is_err());
    }

    #[test]
    fn deterministic_for_non_map_types() {
        let engine = Engine::new();
        let value = Vec::from([Text { s: String::from("x") }, Text { s: String::new() }]);

        let first = engine.encode(&value).unwrap();
        for _ in 0..8 {
            assert_eq!(engine.encode(&value).unwrap(), first);
        }
    }

    #[test]
    fn cache_hit_matches_fresh_compile() {
        let warm = Engine::new();
        let value = Int { i: -7 };

        let miss = warm.encode(&value).unwrap();
        let hit = warm.encode(&value).unwrap();
        let fresh = Engine::new().encode(&value).unwrap();

        assert_eq!(miss, hit);
        assert_eq!(hit, fresh);
        assert_eq!(warm.cached_types(), 1);

        let procedure = warm.procedure_for(Int::type_info()).unwrap();
        assert!(procedure.ptr_eq(&warm.procedure_for(Int::type_info()).unwrap()));
    }

    #[test]
    fn no_leakage_between_calls() {
        let engine = Engine::with_config(EngineConfig {
            buffer_pool_size: 1,
            ..EngineConfig::default()
        })
        .unwrap();

        let long = engine.encode(&String::from("a much longer string value")).unwrap();
        let short = engine.encode(&1u8).unwrap();

        assert_eq!(long, br#""a much longer string value""#);
        assert_eq!(short, b"1");
        assert_eq!(short.len(), short.capacity());
        assert_eq!(engine.idle_buffers(), 1);
    }

    /// A map that reports one entry more than it visits.
    struct MiscountedMap(Vec<(u8, u8)>);

    impl Map for MiscountedMap {
        type Key = u8;
        type Value = u8;

        fn entry_count(&self) -> usize {
            self.0.len() + 1
        }

        fn for_each_entry<'a>(&'a self, f: &mut dyn FnMut(&'a u8, &'a u8)) {
            self.0.iter().for_each(|(k, v)| f(k, v));
        }
    }

    // SAFETY: the info is built for `Self`.
    unsafe impl Typed for MiscountedMap {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| TypeInfo::Map(MapInfo::new::<Self>()))
        }
    }

    #[test]
    fn buffer_returns_to_pool_on_error() {
        let engine = Engine::new();
        let _ = engine.encode(&1u8);
        assert_eq!(engine.idle_buffers(), 1);

        let err = engine.encode(&MiscountedMap(Vec::from([(1, 2)]))).unwrap_err();
        assert_eq!(
            err,
            EncodeError::MapLenMismatch {
                type_path: MiscountedMap::type_info().type_path(),
                expected: 2,
                visited: 1,
            }
        );
        assert_eq!(engine.idle_buffers(), 1);
        assert_eq!(engine.encode(&2u8).unwrap(), b"2");
    }

    /// A `u8` that hands out the descriptor of `String`.
    struct Impostor(#[expect(dead_code, reason = "never read")] u8);

    // SAFETY: not upheld on purpose, the engine must refuse the value before
    // reading it as a `String`.
    unsafe impl Typed for Impostor {
        fn type_info() -> &'static TypeInfo {
            <String as Typed>::type_info()
        }
    }

    #[test]
    fn descriptor_of_another_type_is_rejected() {
        let engine = Engine::new();
        let err = engine.encode(&Impostor(7)).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Unsupported(CompileError::DescriptorMismatch {
                type_path: <String as Typed>::type_info().type_path(),
            })
        );
        assert_eq!(engine.cached_types(), 0);
    }

    /// Declares a `String` field over the storage of a `u8`.
    struct Oversized {
        _x: u8,
    }

    // SAFETY: `StructInfo::new` refuses the field before a descriptor exists.
    unsafe impl Typed for Oversized {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::Struct(StructInfo::new::<Self>(&[NamedField::new::<String>(
                    "s",
                    offset_of!(Self, _x),
                )]))
            })
        }
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn field_outside_the_struct_is_refused() {
        let _ = Engine::new().encode_to_string(&Oversized { _x: 7 });
    }

    #[test]
    fn concurrent_encoding() {
        let engine = Engine::new();

        thread::scope(|s| {
            for t in 0..8isize {
                let engine = &engine;
                s.spawn(move || {
                    for i in 0..100isize {
                        let v = Int { i: t * 1000 + i };
                        let expected = alloc::format!("{{{}}}", t * 1000 + i);
                        assert_eq!(engine.encode_to_string(&v).unwrap(), expected);

                        let map = HashMap::from([(t, i)]);
                        assert_eq!(
                            engine.encode_to_string(&map).unwrap(),
                            alloc::format!("{{{t}:{i},}}")
                        );
                    }
                });
            }
        });

        assert_eq!(engine.cached_types(), 2);
    }

    #[test]
    fn depth_limit_from_config() {
        let engine = Engine::with_config(EngineConfig {
            max_depth: 2,
            ..EngineConfig::default()
        })
        .unwrap();

        assert!(engine.encode(&Vec::from([1u8])).is_ok());
        assert!(matches!(
            engine.encode(&Vec::from([Vec::from([1u8])])),
            Err(EncodeError::Unsupported(CompileError::DepthLimit { limit: 2, .. }))
        ));
    }

    #[test]
    fn cursor_limit_from_config() {
        let engine = Engine::with_config(EngineConfig {
            max_pooled_cursor_entries: 4,
            ..EngineConfig::default()
        })
        .unwrap();

        let big: HashMap<u16, u16> = (0..100).map(|i| (i, i)).collect();
        engine.encode(&big).unwrap();
        assert_eq!(engine.idle_cursors(), 0);

        engine.encode(&HashMap::from([(1u16, 2u16)])).unwrap();
        assert_eq!(engine.idle_cursors(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Engine::with_config(EngineConfig {
            buffer_pool_size: 0,
            ..EngineConfig::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::Zero("buffer_pool_size"));
    }

    #[test]
    fn global_engine_is_shared() {
        assert!(core::ptr::eq(Engine::global(), Engine::global()));
        assert_eq!(Engine::global().encode(&5u8).unwrap(), b"5");
    }
}
