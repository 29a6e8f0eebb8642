use crate::impls::utils::impl_reflect_for_hashmap;

impl_reflect_for_hashmap!(::vc_utils::hash::hashbrown::HashMap<K, V, S>);
