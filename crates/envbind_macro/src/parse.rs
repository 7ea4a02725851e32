//! Attribute parsing for `#[envvar = "..."]`, `#[tag(...)]` and `#[bind(...)]`.
//!
//! Tag strings are carried through verbatim. Their grammar is checked by
//! the runtime, so that a malformed tag is reported the same way whichever
//! namespace it lives in.
//!
//! # Supported Syntax
//!
//! ```ignore
//! #[envvar = "MY_INT,default=1234"]                 // default namespace
//! #[tag(voodoo = "MY_INT", other = "-,default=1")]  // any namespace
//! #[bind(hooks)]                                     // struct-level
//! ```

use std::collections::HashSet;

use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, DeriveInput, Error as SynError, Expr, ExprLit, Field, Lit, LitStr, Meta,
    Result as SynResult,
};

/// Namespace written by `#[envvar = "..."]`.
pub const ENVVAR_NAMESPACE: &str = "envvar";

// ============================================================================
// Field Tags
// ============================================================================

/// All tags attached to one field, in source order.
pub struct FieldTags {
    /// `(namespace, raw tag)` pairs.
    pub tags: Vec<(String, LitStr)>,
}

impl FieldTags {
    /// Collects the tags of `field`. Returns `None` for untagged fields.
    pub fn parse(field: &Field) -> SynResult<Option<Self>> {
        let mut parser = TagParser::default();

        for attr in &field.attrs {
            if attr.path().is_ident(ENVVAR_NAMESPACE) {
                let raw = envvar_value(attr)?;
                parser.push(ENVVAR_NAMESPACE.to_string(), raw, attr)?;
            } else if attr.path().is_ident("tag") {
                attr.parse_nested_meta(|meta| parser.parse_meta(&meta))?;
            }
        }

        Ok((!parser.tags.is_empty()).then_some(Self { tags: parser.tags }))
    }
}

/// Extracts the string of `#[envvar = "..."]`.
fn envvar_value(attr: &Attribute) -> SynResult<LitStr> {
    if let Meta::NameValue(meta) = &attr.meta
        && let Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) = &meta.value
    {
        return Ok(lit_str.clone());
    }

    Err(SynError::new_spanned(
        attr,
        "expected a string literal, e.g. #[envvar = \"KEY\"]",
    ))
}

#[derive(Default)]
struct TagParser {
    seen: HashSet<String>,
    tags: Vec<(String, LitStr)>,
}

impl TagParser {
    fn push(
        &mut self,
        namespace: String,
        raw: LitStr,
        spanned: impl quote::ToTokens,
    ) -> SynResult<()> {
        if !self.seen.insert(namespace.clone()) {
            return Err(SynError::new_spanned(
                spanned,
                format!("Duplicate tag namespace: `{namespace}`"),
            ));
        }

        self.tags.push((namespace, raw));
        Ok(())
    }

    /// Parses one `ns = "..."` entry of `#[tag(...)]`.
    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> SynResult<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("tag namespaces must be plain identifiers"));
        };

        let namespace = ident.to_string();
        let raw: LitStr = meta
            .value()
            .and_then(|value| value.parse())
            .map_err(|_| meta.error(format!("expected `{namespace} = \"...\"`")))?;

        self.push(namespace, raw, &meta.path)
    }
}

// ============================================================================
// Struct Options
// ============================================================================

/// Options from `#[bind(...)]` on the struct.
#[derive(Default)]
pub struct BindAttr {
    /// The user supplies `impl Hooks`.
    pub hooks: bool,
}

impl BindAttr {
    /// Parses every `#[bind(...)]` attribute on the struct.
    pub fn parse_from_struct(input: &DeriveInput) -> SynResult<Self> {
        let mut parser = OptionParser::default();

        for attr in &input.attrs {
            if attr.path().is_ident("bind") {
                attr.parse_nested_meta(|meta| parser.parse_meta(&meta))?;
            }
        }

        Ok(parser.attr)
    }
}

#[derive(Default)]
struct OptionParser {
    seen: HashSet<&'static str>,
    attr: BindAttr,
}

impl OptionParser {
    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> SynResult<()> {
        let key: &'static str = if meta.path.is_ident("hooks") {
            "hooks"
        } else {
            let name = meta
                .path
                .get_ident()
                .map_or_else(|| "?".to_string(), ToString::to_string);

            return Err(meta.error(format!("Unknown option `{name}`")));
        };

        if !self.seen.insert(key) {
            return Err(meta.error(format!("Duplicate option: `{key}`")));
        }

        self.attr.hooks = true;
        Ok(())
    }
}
