use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson,
};
use serde_json::Value;

/// What a template function returns
pub type FuncResult = std::result::Result<Value, Box<dyn std::error::Error + Send + Sync>>;

/// A function callable from template bodies, e.g. `{{upper name}}` or `(upper name)`
pub type Func = Arc<dyn Fn(&[Value]) -> FuncResult + Send + Sync>;

/// Named functions to register on a template namespace
#[derive(Clone, Default)]
pub struct FuncMap {
    funcs: BTreeMap<String, Func>,
}

impl FuncMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a function
    pub fn insert<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(&[Value]) -> FuncResult + Send + Sync + 'static,
    {
        self.funcs.insert(name.into(), Arc::new(func));
        self
    }

    /// Builder form of [`FuncMap::insert`]
    pub fn with<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> FuncResult + Send + Sync + 'static,
    {
        self.insert(name, func);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Func> {
        self.funcs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Register every function as a handlebars helper
    pub(crate) fn register(&self, registry: &mut Handlebars<'static>) {
        for (name, func) in &self.funcs {
            registry.register_helper(
                name,
                Box::new(FuncHelper {
                    name: name.clone(),
                    func: Arc::clone(func),
                }),
            );
        }
    }
}

impl fmt::Debug for FuncMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.funcs.keys()).finish()
    }
}

/// Adapts a [`Func`] to the handlebars helper protocol.
///
/// Implemented through `call_inner` so the result can be used both as a
/// rendered value (escaped by the registry's escape fn) and as a subexpression.
struct FuncHelper {
    name: String,
    func: Func,
}

impl HelperDef for FuncHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let args: Vec<Value> = h.params().iter().map(|param| param.value().clone()).collect();

        (self.func)(&args).map(ScopedJson::Derived).map_err(|err| {
            RenderErrorReason::Other(format!("error calling {}: {}", self.name, err)).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upper(args: &[Value]) -> FuncResult {
        let text = args.first().and_then(Value::as_str).ok_or("upper expects a string")?;
        Ok(Value::String(text.to_uppercase()))
    }

    #[test]
    fn test_func_map_names_are_sorted() {
        let funcs = FuncMap::new()
            .with("upper", upper)
            .with("answer", |_: &[Value]| Ok(json!(42)));

        assert_eq!(funcs.len(), 2);
        assert_eq!(funcs.names().collect::<Vec<_>>(), vec!["answer", "upper"]);
        assert_eq!(format!("{:?}", funcs), r#"{"answer", "upper"}"#);
    }

    #[test]
    fn test_registered_func_renders() {
        let mut registry = Handlebars::new();
        FuncMap::new().with("upper", upper).register(&mut registry);

        let rendered = registry
            .render_template("{{upper name}}!", &json!({"name": "ada"}))
            .unwrap();
        assert_eq!(rendered, "ADA!");
    }

    #[test]
    fn test_func_error_becomes_render_error() {
        let mut registry = Handlebars::new();
        FuncMap::new().with("upper", upper).register(&mut registry);

        let err = registry
            .render_template("{{upper count}}", &json!({"count": 3}))
            .unwrap_err();
        assert!(err.to_string().contains("upper expects a string"));
    }
}
