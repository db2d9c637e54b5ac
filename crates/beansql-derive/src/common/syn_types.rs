//! Type inspection helpers for field types.

const INTEGER_TYPES: [&str; 8] = ["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64"];

/// Last path segment of a plain (non-qualified) type path.
fn last_segment(ty: &syn::Type) -> Option<&syn::PathSegment> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => p.path.segments.last(),
        syn::Type::Group(g) => last_segment(&g.elem),
        _ => None,
    }
}

/// Whether the type is `Option<_>`, under any path prefix.
pub fn is_option(ty: &syn::Type) -> bool {
    last_segment(ty).is_some_and(|seg| {
        seg.ident == "Option" && matches!(seg.arguments, syn::PathArguments::AngleBracketed(_))
    })
}

/// Whether the type is a bare integer primitive usable as a key.
pub fn is_integer_type(ty: &syn::Type) -> bool {
    last_segment(ty).is_some_and(|seg| {
        seg.arguments.is_none() && INTEGER_TYPES.iter().any(|name| seg.ident == *name)
    })
}
