//! Type inspection helpers shared by the derive implementations.

use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

/// The form kind of a field, decided from its declared Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredKind {
    Text,
    Int64,
    Bool,
    Date,
    TextList,
    Record,
    Other,
}

impl InferredKind {
    /// Whether the binder can convert posted text into this kind.
    pub const fn is_assignable(self) -> bool {
        !matches!(self, Self::Record | Self::Other)
    }

    /// The `FieldKind` variant name.
    pub const fn variant(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Int64 => "Int64",
            Self::Bool => "Bool",
            Self::Date => "Date",
            Self::TextList => "TextList",
            Self::Record => "Record",
            Self::Other => "Other",
        }
    }
}

const SCALARS: &[&str] = &[
    "i8", "i16", "i32", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32", "f64",
    "char", "str",
];

const CONTAINERS: &[&str] = &[
    "Option", "Vec", "VecDeque", "HashMap", "BTreeMap", "HashSet", "BTreeSet", "Box", "Rc", "Arc",
];

/// Classifies a field type.
///
/// Matching is by the last path segment, so `std::string::String` and
/// `formx_forms::Date` are recognized. Unrecognized named types are treated
/// as nested records; non-path types (references, tuples, arrays) are
/// `Other`.
pub fn infer_kind(ty: &Type) -> InferredKind {
    let Type::Path(type_path) = ty else {
        return InferredKind::Other;
    };
    if type_path.qself.is_some() {
        return InferredKind::Other;
    }
    let Some(segment) = type_path.path.segments.last() else {
        return InferredKind::Other;
    };

    let ident = segment.ident.to_string();
    match ident.as_str() {
        "String" => InferredKind::Text,
        "i64" => InferredKind::Int64,
        "bool" => InferredKind::Bool,
        "Date" => InferredKind::Date,
        "Vec" if first_type_arg(&segment.arguments).is_some_and(is_string) => {
            InferredKind::TextList
        }
        s if SCALARS.contains(&s) || CONTAINERS.contains(&s) => InferredKind::Other,
        _ => InferredKind::Record,
    }
}

fn first_type_arg(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn is_string(ty: &Type) -> bool {
    infer_kind(ty) == InferredKind::Text
}

/// Converts a `syn::Type` to a string for matching.
pub fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string()
}

/// Renders a type compactly, as written in source: `Vec<String>`.
pub fn type_display_name(ty: &Type) -> String {
    type_to_string(ty).replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn kind(ty: Type) -> InferredKind {
        infer_kind(&ty)
    }

    #[test]
    fn test_supported_kinds() {
        assert_eq!(kind(parse_quote!(String)), InferredKind::Text);
        assert_eq!(kind(parse_quote!(std::string::String)), InferredKind::Text);
        assert_eq!(kind(parse_quote!(i64)), InferredKind::Int64);
        assert_eq!(kind(parse_quote!(bool)), InferredKind::Bool);
        assert_eq!(kind(parse_quote!(Date)), InferredKind::Date);
        assert_eq!(kind(parse_quote!(formx_forms::Date)), InferredKind::Date);
        assert_eq!(kind(parse_quote!(Vec<String>)), InferredKind::TextList);
    }

    #[test]
    fn test_other_kinds() {
        assert_eq!(kind(parse_quote!(i32)), InferredKind::Other);
        assert_eq!(kind(parse_quote!(f64)), InferredKind::Other);
        assert_eq!(kind(parse_quote!(Vec<i64>)), InferredKind::Other);
        assert_eq!(kind(parse_quote!(Option<String>)), InferredKind::Other);
        assert_eq!(kind(parse_quote!(&'static str)), InferredKind::Other);
        assert_eq!(kind(parse_quote!((i64, i64))), InferredKind::Other);
        assert_eq!(kind(parse_quote!([u8; 4])), InferredKind::Other);
    }

    #[test]
    fn test_named_types_are_records() {
        assert_eq!(kind(parse_quote!(Address)), InferredKind::Record);
        assert_eq!(kind(parse_quote!(crate::models::Address)), InferredKind::Record);
    }

    #[test]
    fn test_type_display_name() {
        let ty: Type = parse_quote!(Vec<String>);
        assert_eq!(type_display_name(&ty), "Vec<String>");
        let ty: Type = parse_quote!(i64);
        assert_eq!(type_display_name(&ty), "i64");
    }

    #[test]
    fn test_assignable() {
        assert!(InferredKind::TextList.is_assignable());
        assert!(!InferredKind::Record.is_assignable());
        assert!(!InferredKind::Other.is_assignable());
    }
}
