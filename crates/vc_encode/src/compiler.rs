//! Turns type descriptors into [`Procedure`]s.
//!
//! Compilation only looks at the [`TypeInfo`], never at a value, so a type
//! always compiles to the same behavior and the result can be cached by
//! `TypeId`.
//!
//! | Kind      | Output                                       |
//! |-----------|----------------------------------------------|
//! | `Int`     | decimal, `-12`                               |
//! | `String`  | quoted and escaped, `"a\"b"`                 |
//! | `Struct`  | fields in declaration order, `{<f0><f1>}`    |
//! | `List`    | `[<e0>,<e1>,]`, `null` for a null list       |
//! | `Map`     | `{<k0>:<v0>,}`, `{}` when empty              |
//! | `Pointer` | the pointee, `null` for a null pointer       |
//! | `Opaque`  | [`CompileError::UnsupportedType`]            |
//!
//! Struct fields are not separated and lists and maps keep the trailing
//! comma. Map entries come out in the map's iteration order, which is
//! unordered for hash maps.

use alloc::vec::Vec;
use core::any::TypeId;

use vc_os::sync::{Arc, OnceLock, Weak};
use vc_reflect::info::{IntRepr, ListInfo, MapInfo, PointerInfo};
use vc_reflect::info::{StringInfo, StructInfo, TypeInfo};

use crate::cursor::{CursorRecycle, MapCursor};
use crate::error::{CompileError, EncodeError};
use crate::pool::Pool;
use crate::procedure::Procedure;

/// The pool map procedures take their cursors from.
pub type CursorPool = Pool<MapCursor, CursorRecycle>;

type Slot = OnceLock<Procedure>;

/// A type whose procedure is being compiled.
struct Frame {
    type_id: TypeId,
    /// Created when the type is reached again from inside itself.
    slot: Option<Arc<Slot>>,
}

// -----------------------------------------------------------------------------
// Compiler

/// Builds a [`Procedure`] for a type by walking its descriptor.
///
/// A type reached again while it is still being compiled, such as
/// `Node { next: Option<Box<Node>> }`, gets a procedure that resolves to the
/// finished one when it runs. Only the nesting of distinct types counts
/// towards `max_depth`.
///
/// # Examples
///
/// ```
/// use vc_encode::{Buffer, Compiler, cursor::CursorRecycle, pool::Pool};
/// use vc_os::sync::Arc;
/// use vc_reflect::type_and_ptr_of;
///
/// let compiler = Compiler::new(Arc::new(Pool::new(4, CursorRecycle::new(64))), 16);
///
/// let value = vec![3u8, 1];
/// let (info, ptr) = type_and_ptr_of(&value);
/// let procedure = compiler.compile(info).unwrap();
///
/// let mut buf = Buffer::default();
/// unsafe { procedure.call(&mut buf, ptr).unwrap() };
/// assert_eq!(buf.as_bytes(), b"[3,1,]");
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    cursors: Arc<CursorPool>,
    max_depth: usize,
}

impl Compiler {
    /// Creates a compiler whose map procedures share `cursors`, and that gives
    /// up on types nested deeper than `max_depth`.
    #[inline]
    pub fn new(cursors: Arc<CursorPool>, max_depth: usize) -> Self {
        Self { cursors, max_depth }
    }

    /// Returns the pool map procedures take their cursors from.
    #[inline]
    pub fn cursors(&self) -> &CursorPool {
        &self.cursors
    }

    /// Compiles the procedure of the type described by `info`.
    ///
    /// Fails if the type, or any type reachable from it, has no encoding rule,
    /// or if a nested descriptor does not belong to the type declared for it.
    pub fn compile(&self, info: &'static TypeInfo) -> Result<Procedure, CompileError> {
        self.compile_at(info, &mut Vec::new())
    }

    fn compile_child(
        &self,
        info: &'static TypeInfo,
        declared: TypeId,
        stack: &mut Vec<Frame>,
    ) -> Result<Procedure, CompileError> {
        if info.type_id() != declared {
            return Err(CompileError::DescriptorMismatch {
                type_path: info.type_path(),
            });
        }
        self.compile_at(info, stack)
    }

    fn compile_at(
        &self,
        info: &'static TypeInfo,
        stack: &mut Vec<Frame>,
    ) -> Result<Procedure, CompileError> {
        let type_id = info.type_id();
        let path = info.type_path();

        if let Some(frame) = stack.iter_mut().find(|frame| frame.type_id == type_id) {
            let slot = frame.slot.get_or_insert_with(|| Arc::new(Slot::new()));
            return Ok(deferred_procedure(path, Arc::downgrade(slot)));
        }

        if stack.len() >= self.max_depth {
            return Err(CompileError::DepthLimit {
                type_path: path,
                limit: self.max_depth,
            });
        }

        stack.push(Frame {
            type_id,
            slot: None,
        });
        let compiled = match info {
            TypeInfo::Int(int) => Ok(int_procedure(path, int.repr())),
            TypeInfo::String(text) => Ok(string_procedure(path, text)),
            TypeInfo::Struct(s) => self.struct_procedure(path, s, stack),
            TypeInfo::List(list) => self.list_procedure(path, list, stack),
            TypeInfo::Map(map) => self.map_procedure(path, map, stack),
            TypeInfo::Pointer(ptr) => self.pointer_procedure(path, ptr, stack),
            TypeInfo::Opaque(_) => Err(CompileError::UnsupportedType {
                kind: info.kind(),
                type_path: path,
            }),
        };
        let slot = stack.pop().and_then(|frame| frame.slot);
        let procedure = compiled?;

        Ok(match slot {
            Some(slot) => {
                // The slot is fresh, nothing else sets it.
                let _ = slot.set(procedure);
                recursive_procedure(path, slot)
            }
            None => procedure,
        })
    }

    fn struct_procedure(
        &self,
        path: &'static str,
        info: &StructInfo,
        stack: &mut Vec<Frame>,
    ) -> Result<Procedure, CompileError> {
        let fields = info
            .iter()
            .map(|field| {
                let procedure = self.compile_child(field.type_info(), field.ty_id(), stack)?;
                Ok((field.offset(), procedure))
            })
            .collect::<Result<Vec<_>, CompileError>>()?;

        Ok(Procedure::new(path, move |buf, ptr| {
            buf.push(b'{');
            for (offset, field) in &fields {
                // SAFETY: `StructInfo::new` checked that the field lies inside
                // the struct behind `ptr`, aligned for its type.
                unsafe { field.call(buf, ptr.byte_add(*offset))? };
            }
            buf.push(b'}');
            Ok(())
        }))
    }

    fn list_procedure(
        &self,
        path: &'static str,
        info: &ListInfo,
        stack: &mut Vec<Frame>,
    ) -> Result<Procedure, CompileError> {
        let item = self.compile_child(info.item_info(), info.item_id(), stack)?;
        let stride = info.item_stride();
        let info = info.clone();

        Ok(Procedure::new(path, move |buf, ptr| {
            // SAFETY: a procedure is only called on its own type.
            let header = unsafe { info.header(ptr) };
            let Some(data) = header.data else {
                buf.extend(b"null");
                return Ok(());
            };

            buf.push(b'[');
            for index in 0..header.len {
                // SAFETY: `index < len` and `stride` is the item size.
                unsafe { item.call(buf, data.element(index, stride))? };
                buf.push(b',');
            }
            buf.push(b']');
            Ok(())
        }))
    }

    fn map_procedure(
        &self,
        path: &'static str,
        info: &MapInfo,
        stack: &mut Vec<Frame>,
    ) -> Result<Procedure, CompileError> {
        let key = self.compile_child(info.key_info(), info.key_id(), stack)?;
        let value = self.compile_child(info.value_info(), info.value_id(), stack)?;
        let cursors = Arc::clone(&self.cursors);
        let info = info.clone();

        Ok(Procedure::new(path, move |buf, ptr| {
            // SAFETY: a procedure is only called on its own type.
            let expected = unsafe { info.len(ptr) };
            if expected == 0 {
                buf.extend(b"{}");
                return Ok(());
            }

            let mut cursor = cursors.acquire();
            // SAFETY: as above.
            let entries = unsafe { cursor.reset(&info, ptr) };
            if entries.visited() != expected {
                return Err(EncodeError::MapLenMismatch {
                    type_path: path,
                    expected,
                    visited: entries.visited(),
                });
            }

            buf.push(b'{');
            for (k, v) in entries {
                // SAFETY: entry views of this map, typed by its key and value info.
                unsafe {
                    key.call(buf, k)?;
                    buf.push(b':');
                    value.call(buf, v)?;
                }
                buf.push(b',');
            }
            buf.push(b'}');
            Ok(())
        }))
    }

    fn pointer_procedure(
        &self,
        path: &'static str,
        info: &PointerInfo,
        stack: &mut Vec<Frame>,
    ) -> Result<Procedure, CompileError> {
        let target = self.compile_child(info.target_info(), info.target_id(), stack)?;
        let info = info.clone();

        Ok(Procedure::new(path, move |buf, ptr| {
            // SAFETY: a procedure is only called on its own type.
            match unsafe { info.deref(ptr) } {
                // SAFETY: the pointee has the target type.
                Some(pointee) => unsafe { target.call(buf, pointee) },
                None => {
                    buf.extend(b"null");
                    Ok(())
                }
            }
        }))
    }
}

// -----------------------------------------------------------------------------
// Recursive types

/// The procedure of a recursive type, owning the slot its inner references
/// resolve through.
fn recursive_procedure(path: &'static str, slot: Arc<Slot>) -> Procedure {
    Procedure::new(path, move |buf, ptr| match slot.get() {
        // SAFETY: the slot holds the procedure of this very type.
        Some(procedure) => unsafe { procedure.call(buf, ptr) },
        None => Err(EncodeError::Unresolved { type_path: path }),
    })
}

/// A reference from inside a recursive type back to itself.
///
/// Holds the slot weakly, the slot owns the procedure this one is part of.
fn deferred_procedure(path: &'static str, slot: Weak<Slot>) -> Procedure {
    Procedure::new(path, move |buf, ptr| {
        let slot = slot.upgrade();
        let Some(procedure) = slot.as_deref().and_then(OnceLock::get) else {
            return Err(EncodeError::Unresolved { type_path: path });
        };
        // SAFETY: the slot holds the procedure of this very type.
        unsafe { procedure.call(buf, ptr) }
    })
}

// -----------------------------------------------------------------------------
// Leaf procedures

fn int_procedure(path: &'static str, repr: IntRepr) -> Procedure {
    macro_rules! read_int {
        ($($repr:ident => $ty:ty),* $(,)?) => {
            match repr {
                $(IntRepr::$repr => Procedure::new(path, |buf, ptr| {
                    ptr.debug_assert_aligned::<$ty>();
                    // SAFETY: a procedure is only called on its own type.
                    buf.push_int(unsafe { *ptr.as_ref::<$ty>() });
                    Ok(())
                }),)*
            }
        };
    }

    read_int! {
        I8 => i8,
        I16 => i16,
        I32 => i32,
        I64 => i64,
        I128 => i128,
        Isize => isize,
        U8 => u8,
        U16 => u16,
        U32 => u32,
        U64 => u64,
        U128 => u128,
        Usize => usize,
    }
}

fn string_procedure(path: &'static str, info: &StringInfo) -> Procedure {
    let info = info.clone();
    Procedure::new(path, move |buf, ptr| {
        // SAFETY: a procedure is only called on its own type.
        buf.push_quoted(unsafe { info.as_str(ptr) });
        Ok(())
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use vc_os::sync::Arc;
    use vc_reflect::Reflect;
    use vc_reflect::derive::Reflect;
    use vc_reflect::info::{ReflectKind, TypeInfo, Typed};

    use super::Compiler;
    use crate::buffer::Buffer;
    use crate::cursor::CursorRecycle;
    use crate::error::{CompileError, EncodeError};
    use crate::pool::Pool;

    fn compiler() -> Compiler {
        Compiler::new(Arc::new(Pool::new(4, CursorRecycle::new(1024))), 32)
    }

    fn run(value: &dyn Reflect) -> Result<String, EncodeError> {
        let procedure = compiler().compile(value.reflect_type_info())?;
        let mut buf = Buffer::default();
        unsafe { procedure.call(&mut buf, value.as_ptr())? };
        Ok(String::from_utf8(buf.to_vec()).unwrap())
    }

    #[derive(Reflect)]
    struct Single {
        i: i64,
    }

    #[derive(Reflect)]
    struct Mixed {
        id: u16,
        name: String,
        tags: Vec<&'static str>,
    }

    #[derive(Reflect)]
    struct Tuple(i8, u128);

    #[derive(Reflect)]
    struct Unit;

    #[derive(Reflect)]
    struct Nested {
        inner: Single,
        list: [Single; 2],
    }

    #[derive(Reflect)]
    struct WithFn {
        ok: u8,
        callback: fn() -> u8,
    }

    #[derive(Reflect)]
    struct Node {
        value: u8,
        next: Option<Box<Node>>,
    }

    #[derive(Reflect)]
    struct Wrapper<T> {
        value: T,
    }

    #[derive(Reflect)]
    struct Tree {
        id: u8,
        children: Vec<Tree>,
    }

    #[derive(Reflect)]
    struct Even {
        odd: Option<Box<Odd>>,
    }

    #[derive(Reflect)]
    struct Odd {
        n: u8,
        even: Option<Box<Even>>,
    }

    /// Claims to be a `u64`, breaking the `Typed` contract.
    struct Disguised(#[expect(dead_code, reason = "never read")] u64);

    // SAFETY: not upheld on purpose, the compiler must refuse the descriptor
    // before any procedure reads a `Disguised`.
    unsafe impl Typed for Disguised {
        fn type_info() -> &'static TypeInfo {
            <u64 as Typed>::type_info()
        }
    }

    #[derive(Reflect)]
    struct Holder {
        inner: Disguised,
    }

    #[test]
    fn ints_and_strings() {
        assert_eq!(run(&-42i32).unwrap(), "-42");
        assert_eq!(run(&u64::MAX).unwrap(), "18446744073709551615");
        assert_eq!(run(&String::from("hi \"you\"")).unwrap(), r#""hi \"you\"""#);
        assert_eq!(run(&"static").unwrap(), r#""static""#);
    }

    #[test]
    fn structs_are_unlabelled() {
        assert_eq!(run(&Single { i: 10 }).unwrap(), "{10}");
        assert_eq!(run(&Tuple(-1, 2)).unwrap(), "{-12}");
        assert_eq!(run(&Unit).unwrap(), "{}");

        let mixed = Mixed {
            id: 7,
            name: String::from("a\"b"),
            tags: Vec::from(["x", "y"]),
        };
        assert_eq!(run(&mixed).unwrap(), r#"{7"a\"b"["x","y",]}"#);

        let nested = Nested {
            inner: Single { i: 1 },
            list: [Single { i: 2 }, Single { i: 3 }],
        };
        assert_eq!(run(&nested).unwrap(), "{{1}[{2},{3},]}");
    }

    #[test]
    fn generic_structs() {
        assert_eq!(run(&Wrapper { value: 5u8 }).unwrap(), "{5}");
        assert_eq!(
            run(&Wrapper { value: String::from("s") }).unwrap(),
            r#"{"s"}"#
        );
    }

    #[test]
    fn lists_keep_trailing_comma() {
        assert_eq!(run(&Vec::from([5, 4, 3, 2, 1])).unwrap(), "[5,4,3,2,1,]");
        assert_eq!(run(&Vec::<u8>::new()).unwrap(), "[]");
        assert_eq!(run(&[[1u8, 2], [3, 4]]).unwrap(), "[[1,2,],[3,4,],]");
    }

    #[test]
    fn null_list_and_pointer() {
        assert_eq!(run(&None::<Vec<u8>>).unwrap(), "null");
        assert_eq!(run(&Some(Vec::from([1u8]))).unwrap(), "[1,]");
        assert_eq!(run(&None::<Box<u8>>).unwrap(), "null");
        assert_eq!(run(&Some(Box::new(9u8))).unwrap(), "9");
        assert_eq!(run(&Box::new(String::from("boxed"))).unwrap(), r#""boxed""#);
    }

    #[test]
    fn ordered_map() {
        let map = BTreeMap::from([(String::from("a"), 1u8), (String::from("b"), 2)]);
        assert_eq!(run(&map).unwrap(), r#"{"a":1,"b":2,}"#);
        assert_eq!(run(&BTreeMap::<u8, u8>::new()).unwrap(), "{}");
    }

    #[test]
    fn indirect_maps() {
        let boxed: Box<HashMap<u8, u8>> = Box::new(HashMap::from([(1, 2)]));
        assert_eq!(run(&boxed).unwrap(), "{1:2,}");

        let none: Option<Box<HashMap<u8, u8>>> = None;
        assert_eq!(run(&none).unwrap(), "null");

        let list = Vec::from([HashMap::from([(3u8, 4u8)]), HashMap::new()]);
        assert_eq!(run(&list).unwrap(), "[{3:4,},{},]");
    }

    #[test]
    fn maps_of_maps() {
        let ordered = BTreeMap::from([
            (1u8, BTreeMap::from([(2u8, 3u8)])),
            (4, BTreeMap::new()),
            (5, BTreeMap::from([(6, 7), (8, 9)])),
        ]);
        assert_eq!(run(&ordered).unwrap(), "{1:{2:3,},4:{},5:{6:7,8:9,},}");

        let hashed: HashMap<u8, HashMap<u8, u8>> =
            HashMap::from([(1, HashMap::from([(2, 3)])), (4, HashMap::new())]);
        let out = run(&hashed).unwrap();
        assert!(
            out == "{1:{2:3,},4:{},}" || out == "{4:{},1:{2:3,},}",
            "unexpected output {out}"
        );
    }

    #[test]
    fn unsupported_kinds() {
        fn f() -> u8 {
            0
        }

        let err = run(&WithFn { ok: 1, callback: f }).unwrap_err();
        let EncodeError::Unsupported(err) = err else {
            panic!("expected an unsupported type error, got {err:?}");
        };
        assert_eq!(err.unsupported_kind(), Some(ReflectKind::Opaque));

        assert!(matches!(
            run(&1.5f64),
            Err(EncodeError::Unsupported(CompileError::UnsupportedType {
                kind: ReflectKind::Opaque,
                ..
            }))
        ));
    }

    #[test]
    fn self_referential_types() {
        let list = Node {
            value: 1,
            next: Some(Box::new(Node {
                value: 2,
                next: Some(Box::new(Node {
                    value: 3,
                    next: None,
                })),
            })),
        };
        assert_eq!(run(&list).unwrap(), "{1{2{3null}}}");

        let tree = Tree {
            id: 1,
            children: Vec::from([
                Tree {
                    id: 2,
                    children: Vec::new(),
                },
                Tree {
                    id: 3,
                    children: Vec::from([Tree {
                        id: 4,
                        children: Vec::new(),
                    }]),
                },
            ]),
        };
        assert_eq!(run(&tree).unwrap(), "{1[{2[]},{3[{4[]},]},]}");
    }

    #[test]
    fn mutually_recursive_types() {
        let value = Even {
            odd: Some(Box::new(Odd {
                n: 1,
                even: Some(Box::new(Even { odd: None })),
            })),
        };
        assert_eq!(run(&value).unwrap(), "{{1{null}}}");
        assert_eq!(run(&Odd { n: 5, even: None }).unwrap(), "{5null}");
    }

    #[test]
    fn recursion_does_not_count_towards_depth() {
        let compiler = Compiler::new(Arc::new(Pool::new(1, CursorRecycle::new(8))), 4);
        let procedure = compiler.compile(<Node as Typed>::type_info()).unwrap();

        let mut value = Node {
            value: 0,
            next: None,
        };
        for i in 1..10 {
            value = Node {
                value: i,
                next: Some(Box::new(value)),
            };
        }

        let mut buf = Buffer::default();
        unsafe { procedure.call(&mut buf, value.as_ptr()).unwrap() };
        assert_eq!(buf.as_bytes(), b"{9{8{7{6{5{4{3{2{1{0null}}}}}}}}}}");
    }

    #[test]
    fn nesting_of_distinct_types_is_limited() {
        let compiler = Compiler::new(Arc::new(Pool::new(1, CursorRecycle::new(8))), 3);
        let err = compiler
            .compile(<Vec<Vec<Vec<u8>>> as Typed>::type_info())
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::DepthLimit {
                type_path: <u8 as Typed>::type_info().type_path(),
                limit: 3,
            }
        );
    }

    #[test]
    fn descriptor_of_another_type_is_rejected() {
        let err = run(&Holder { inner: Disguised(1) }).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Unsupported(CompileError::DescriptorMismatch {
                type_path: <u64 as Typed>::type_info().type_path(),
            })
        );
    }

    #[test]
    fn compiled_twice_behaves_the_same() {
        let compiler = compiler();
        let value = Mixed {
            id: 1,
            name: String::from("n"),
            tags: Vec::new(),
        };

        let a = compiler.compile(value.reflect_type_info()).unwrap();
        let b = compiler.compile(value.reflect_type_info()).unwrap();
        assert!(!a.ptr_eq(&b));

        let mut out_a = Buffer::default();
        let mut out_b = Buffer::default();
        unsafe {
            a.call(&mut out_a, value.as_ptr()).unwrap();
            b.call(&mut out_b, value.as_ptr()).unwrap();
        }
        assert_eq!(out_a.as_bytes(), out_b.as_bytes());
    }
}
