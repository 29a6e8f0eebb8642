use crate::impls::utils::impl_reflect_for_hashmap;

impl_reflect_for_hashmap!(::std::collections::HashMap<K, V, S>);
