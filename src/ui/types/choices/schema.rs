use anyhow::{Context, Result, bail};
use schemars::{JsonSchema, Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// File-path hints attached to a string field through schema extensions
/// (`x-file`, `x-must-exist`, `x-extensions`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathHint {
    pub must_exist: bool,
    pub extensions: Vec<String>,
}

/// One primitive field of a choice's params, as the wizard asks for it.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub path: Option<PathHint>,
}

type Obj = Map<String, Value>;

pub fn schema_for<T: JsonSchema>() -> Schema {
    schema_for!(T)
}

/// Lists the promptable fields of the `kind_key` variant of a tagged enum.
///
/// Nested objects and enums (anything without a primitive `type`) are
/// skipped; they are collected through sub-menus instead.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    let branch = find_branch(root_obj, kind_key)?;

    let Some(params) = branch
        .get("properties")
        .and_then(Value::as_object)
        .and_then(|p| p.get("params"))
        .and_then(Value::as_object)
        .and_then(|p| resolve_ref(root_obj, p))
    else {
        return Ok(vec![]);
    };

    let Some(props) = params.get("properties").and_then(Value::as_object) else {
        return Ok(vec![]);
    };
    let required: Vec<&str> = params
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut out = Vec::new();
    for (name, field) in props {
        let field = field
            .as_object()
            .and_then(|f| resolve_ref(root_obj, f))
            .with_context(|| format!("field schema for '{name}' is not a resolvable object"))?;
        if let Some(spec) = field_spec(name, field, required.contains(&name.as_str())) {
            out.push(spec);
        }
    }
    Ok(out)
}

fn find_branch<'a>(root: &'a Obj, kind_key: &str) -> Result<&'a Obj> {
    let alternatives = root
        .get("oneOf")
        .or_else(|| root.get("anyOf"))
        .and_then(Value::as_array)
        .context("schema has no oneOf/anyOf alternatives")?;

    for alt in alternatives.iter().filter_map(Value::as_object) {
        let tag = alt
            .get("properties")
            .and_then(Value::as_object)
            .and_then(|p| p.get("type"))
            .and_then(Value::as_object);
        if tag.is_some_and(|t| tag_matches(t, kind_key)) {
            return Ok(alt);
        }
    }
    bail!("no branch found for type={kind_key}")
}

fn tag_matches(tag: &Obj, kind_key: &str) -> bool {
    if tag.get("const").and_then(Value::as_str) == Some(kind_key) {
        return true;
    }
    matches!(
        tag.get("enum").and_then(Value::as_array).map(Vec::as_slice),
        Some([only]) if only.as_str() == Some(kind_key)
    )
}

fn field_spec(name: &str, field: &Obj, required: bool) -> Option<FieldSpec> {
    let kind = primitive_kind(field.get("type")?)?;
    let number = |keys: [&str; 2]| keys.iter().find_map(|k| field.get(*k)).and_then(Value::as_f64);

    let path = field
        .get("x-file")
        .and_then(Value::as_bool)
        .filter(|is_file| *is_file)
        .map(|_| PathHint {
            must_exist: field
                .get("x-must-exist")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            extensions: field
                .get("x-extensions")
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default(),
        });

    Some(FieldSpec {
        name: name.to_string(),
        title: field
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string(),
        description: field
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        required,
        kind,
        default: field.get("default").cloned(),
        min: number(["minimum", "exclusiveMinimum"]),
        max: number(["maximum", "exclusiveMaximum"]),
        path,
    })
}

/// Resolves a local `#/$defs/..` reference; non-reference objects pass through.
fn resolve_ref<'a>(root: &'a Obj, obj: &'a Obj) -> Option<&'a Obj> {
    let Some(reference) = obj.get("$ref") else {
        return Some(obj);
    };
    let pointer = reference.as_str()?.strip_prefix("#/")?;
    let mut cur = root;
    for raw in pointer.split('/') {
        let seg = raw.replace("~1", "/").replace("~0", "~");
        cur = cur.get(&seg)?.as_object()?;
    }
    Some(cur)
}

/// `Option<T>` fields appear as `["T", "null"]` unions.
fn primitive_kind(ty: &Value) -> Option<FieldKind> {
    let from_name = |s: &str| match s {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    };
    match ty {
        Value::String(s) => from_name(s),
        Value::Array(types) => types.iter().filter_map(Value::as_str).find_map(from_name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{SourceChoice, WindowChoice};

    #[test]
    fn csv_source_exposes_path_hint() {
        let specs = specs_for_kind(&schema_for::<SourceChoice>(), "csv-table").unwrap();
        assert_eq!(specs.len(), 1);
        let path = &specs[0];
        assert_eq!(path.name, "path");
        assert_eq!(path.kind, FieldKind::String);
        assert!(path.required);
        let hint = path.path.as_ref().unwrap();
        assert!(hint.must_exist);
        assert_eq!(hint.extensions, vec!["csv".to_string()]);
    }

    #[test]
    fn synthetic_source_fields_have_ranges() {
        let specs = specs_for_kind(&schema_for::<SourceChoice>(), "synthetic").unwrap();
        let stations = specs.iter().find(|s| s.name == "stations").unwrap();
        assert_eq!(stations.kind, FieldKind::Integer);
        assert_eq!(stations.min, Some(1.0));
        let sigma = specs.iter().find(|s| s.name == "sigma").unwrap();
        assert_eq!(sigma.kind, FieldKind::Number);
        assert!(sigma.path.is_none());
    }

    #[test]
    fn optional_fields_are_not_required() {
        let specs = specs_for_kind(&schema_for::<WindowChoice>(), "recent-full-years").unwrap();
        let last = specs.iter().find(|s| s.name == "last_full_year").unwrap();
        assert!(!last.required);
        assert_eq!(last.kind, FieldKind::Integer);
    }

    #[test]
    fn unit_like_params_yield_no_fields() {
        let specs = specs_for_kind(&schema_for::<WindowChoice>(), "all").unwrap();
        assert!(specs.is_empty());
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(specs_for_kind(&schema_for::<WindowChoice>(), "nope").is_err());
    }
}
