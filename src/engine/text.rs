//! Plain-text engine: interpolated values are written exactly as given.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use super::files;
use super::namespace::{Escape, Namespace, Shared};
use super::{Delims, FuncMap, ParseTree};
use crate::error::{Error, Result};
use crate::traits::{FileSystem, RealFileSystem};

/// A named template in a namespace of associated templates.
///
/// Cloning the struct is cheap and yields another handle to the same template;
/// use [`Template::duplicate`] for an independent copy.
#[derive(Clone)]
pub struct Template {
    name: String,
    delims: Delims,
    common: Shared,
}

/// Parse the named files into a new template named after the first file
pub fn parse_files<P: AsRef<Path>>(filenames: &[P]) -> Result<Template> {
    let first = filenames.first().ok_or(Error::NoFiles)?;
    Template::new(files::base_name(first.as_ref())).parse_files(filenames)
}

/// Parse the files matching `pattern` into a new template named after the first match
pub fn parse_glob(pattern: &str) -> Result<Template> {
    let filenames = files::glob(&RealFileSystem, pattern)?;
    parse_files(&filenames)
}

impl Template {
    /// Allocate a new, empty template with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_filesystem(name, Arc::new(RealFileSystem))
    }

    /// Like [`Template::new`], reading files through `fs`
    pub fn with_filesystem(name: impl Into<String>, fs: Arc<dyn FileSystem>) -> Self {
        Self::with_escape(name, Escape::None, fs)
    }

    pub(crate) fn with_escape(
        name: impl Into<String>,
        escape: Escape,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            name: name.into(),
            delims: Delims::default(),
            common: Shared::new(Namespace::new(escape, fs)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delims_in_use(&self) -> &Delims {
        &self.delims
    }

    /// A new, empty template in the same namespace, inheriting the delimiters
    pub fn new_template(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delims: self.delims.clone(),
            common: self.common.clone(),
        }
    }

    /// The same template with different delimiters for subsequent parses
    #[must_use]
    pub fn delims(&self, left: &str, right: &str) -> Self {
        Self {
            delims: Delims::new(left, right),
            ..self.clone()
        }
    }

    /// Register functions on the whole namespace
    #[must_use]
    pub fn funcs(&self, funcs: &FuncMap) -> Self {
        funcs.register(self.common.write().registry_mut());
        self.clone()
    }

    /// The associated template called `name`, if it has been parsed
    pub fn lookup(&self, name: &str) -> Option<Self> {
        if !self.common.read().registry.has_template(name) {
            return None;
        }
        Some(self.new_template(name))
    }

    /// Every parsed template in the namespace, sorted by name
    pub fn templates(&self) -> Vec<Self> {
        let mut names: Vec<String> = self
            .common
            .read()
            .registry
            .get_templates()
            .keys()
            .cloned()
            .collect();
        names.sort();

        names
            .into_iter()
            .map(|name| self.new_template(name))
            .collect()
    }

    /// Whether this template has a body
    pub fn is_defined(&self) -> bool {
        self.common.read().registry.has_template(&self.name)
    }

    /// Compile `text` as the body of this template
    pub fn parse(&self, text: &str) -> Result<Self> {
        let source = self.delims.translate(&self.name, text)?;
        self.common
            .write()
            .registry_mut()
            .register_template_string(&self.name, source)?;

        tracing::debug!(template = %self.name, "parsed template");
        Ok(self.clone())
    }

    /// Attach a precompiled body under `name`, returning the template for `name`
    pub fn add_parse_tree(&self, name: &str, tree: &ParseTree) -> Result<Self> {
        self.common
            .write()
            .registry_mut()
            .register_template(name, tree.to_template());

        tracing::debug!(template = %name, "added parse tree");
        Ok(if name == self.name {
            self.clone()
        } else {
            self.new_template(name)
        })
    }

    /// Parse each file as the template named after its base name.
    ///
    /// A file whose base name matches this template becomes its body.
    pub fn parse_files<P: AsRef<Path>>(&self, filenames: &[P]) -> Result<Self> {
        let fs = self.common.fs();
        for (name, source) in files::read_sources(fs.as_ref(), filenames)? {
            let target = if name == self.name {
                self.clone()
            } else {
                self.new_template(name)
            };
            target.parse(&source)?;
        }
        Ok(self.clone())
    }

    /// Parse the files matching `pattern`, as [`Template::parse_files`]
    pub fn parse_glob(&self, pattern: &str) -> Result<Self> {
        let filenames = files::glob(self.common.fs().as_ref(), pattern)?;
        self.parse_files(&filenames)
    }

    /// An independent copy of this template and every associated template.
    ///
    /// Later parses or function registrations on either side are not seen by
    /// the other.
    pub fn duplicate(&self) -> Result<Self> {
        tracing::debug!(template = %self.name, "cloning namespace");
        Ok(Self {
            name: self.name.clone(),
            delims: self.delims.clone(),
            common: self.common.fork(),
        })
    }

    /// Render this template's body into `out`
    pub fn execute<T: Serialize>(&self, out: &mut dyn Write, data: &T) -> Result<()> {
        let registry = self.common.registry();
        if !registry.has_template(&self.name) {
            return Err(Error::Incomplete {
                name: self.name.clone(),
            });
        }

        tracing::debug!(template = %self.name, "executing template");
        registry.render_to_write(&self.name, data, out)?;
        Ok(())
    }

    /// Render the associated template called `name` into `out`
    pub fn execute_template<T: Serialize>(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &T,
    ) -> Result<()> {
        let registry = self.common.registry();
        if !registry.has_template(name) {
            return Err(Error::NotFound {
                name: name.to_string(),
                parent: self.name.clone(),
            });
        }

        tracing::debug!(template = %name, parent = %self.name, "executing template");
        registry.render_to_write(name, data, out)?;
        Ok(())
    }

    /// Whether both handles share one namespace
    pub fn shares_namespace(&self, other: &Template) -> bool {
        self.common.same_as(&other.common)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("delims", &self.delims)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TemplateDirBuilder;
    use serde_json::{json, Value};

    fn render(template: &Template, data: &Value) -> String {
        let mut out = Vec::<u8>::new();
        template.execute(&mut out, data).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_and_execute_without_escaping() {
        let template = Template::new("greeting").parse("Hello {{name}}!").unwrap();

        assert_eq!(render(&template, &json!({"name": "<b>Ada</b> & co"})), "Hello <b>Ada</b> & co!");
    }

    #[test]
    fn test_new_template_shares_namespace() {
        let root = Template::new("root");
        let child = root.new_template("child");

        assert_eq!(child.name(), "child");
        assert!(child.shares_namespace(&root));
        assert!(root.lookup("child").is_none());

        child.parse("child body").unwrap();
        let found = root.lookup("child").unwrap();
        assert_eq!(render(&found, &json!({})), "child body");
    }

    #[test]
    fn test_templates_lists_parsed_names() {
        let root = Template::new("b").parse("B").unwrap();
        root.new_template("a").parse("A").unwrap();
        root.new_template("unparsed");

        let names: Vec<String> = root.templates().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_execute_empty_template_is_incomplete() {
        let mut out = Vec::<u8>::new();
        let err = Template::new("empty").execute(&mut out, &json!({})).unwrap_err();

        assert!(matches!(err, Error::Incomplete { name } if name == "empty"));
    }

    #[test]
    fn test_execute_template_unknown_name() {
        let root = Template::new("root").parse("root").unwrap();
        let mut out = Vec::<u8>::new();
        let err = root.execute_template(&mut out, "missing", &json!({})).unwrap_err();

        assert!(matches!(err, Error::NotFound { name, parent } if name == "missing" && parent == "root"));
    }

    #[test]
    fn test_delims_apply_to_later_parses_and_children() {
        let root = Template::new("root").delims("[[", "]]");
        root.parse("[[name]] {{kept}}").unwrap();
        let child = root.new_template("child");
        child.parse("<[[name]]>").unwrap();

        let data = json!({"name": "ada"});
        assert_eq!(render(&root, &data), "ada {{kept}}");
        assert_eq!(render(&child, &data), "<ada>");
    }

    #[test]
    fn test_backslashes_survive_custom_delims() {
        let root = Template::new("root").delims("<%", "%>");
        let data = json!({"name": "x", "n": 1});

        assert_eq!(render(&root.parse(r"dir\<%name%>").unwrap(), &data), r"dir\x");
        assert_eq!(render(&root.parse(r"a\{{b}} <%n%>").unwrap(), &data), r"a\{{b}} 1");
    }

    #[test]
    fn test_duplicate_is_independent() {
        let original = Template::new("page").parse("original").unwrap();
        let copy = original.duplicate().unwrap();
        assert!(!copy.shares_namespace(&original));

        copy.parse("changed").unwrap();
        copy.new_template("extra").parse("extra").unwrap();

        assert_eq!(render(&original, &json!({})), "original");
        assert!(original.lookup("extra").is_none());
        assert_eq!(render(&copy, &json!({})), "changed");
    }

    #[test]
    fn test_add_parse_tree_returns_named_template() {
        let root = Template::new("root");
        let tree = ParseTree::parse("tree {{value}}").unwrap();
        let added = root.add_parse_tree("side", &tree).unwrap();

        assert_eq!(added.name(), "side");
        assert!(added.shares_namespace(&root));
        assert_eq!(render(&added, &json!({"value": 1})), "tree 1");
    }

    #[test]
    fn test_parse_files_uses_base_names() {
        let fs = TemplateDirBuilder::new("/tpl")
            .file("layout.tmpl", "layout {{title}}")
            .file("footer.tmpl", "footer")
            .build();
        let root = Template::with_filesystem("layout.tmpl", fs)
            .parse_files(&["/tpl/layout.tmpl", "/tpl/footer.tmpl"])
            .unwrap();

        assert_eq!(root.name(), "layout.tmpl");
        assert_eq!(render(&root, &json!({"title": "T"})), "layout T");

        let mut out = Vec::<u8>::new();
        root.execute_template(&mut out, "footer.tmpl", &json!({})).unwrap();
        assert_eq!(out, b"footer");
    }

    #[test]
    fn test_parse_glob_through_filesystem() {
        let fs = TemplateDirBuilder::new("/tpl")
            .file("a.tmpl", "A")
            .file("b.tmpl", "B")
            .build();
        let root = Template::with_filesystem("root", fs).parse_glob("/tpl/*.tmpl").unwrap();

        assert_eq!(root.name(), "root");
        assert_eq!(root.templates().len(), 2);
        assert!(!root.is_defined());
    }

    #[test]
    fn test_parse_error_is_propagated() {
        let err = Template::new("bad").parse("{{#each items}}").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_funcs_are_shared_by_namespace() {
        let root = Template::new("root").funcs(&FuncMap::new().with("shout", |args: &[Value]| {
            let text = args.first().and_then(Value::as_str).unwrap_or_default();
            Ok(Value::String(format!("{}!", text.to_uppercase())))
        }));
        let child = root.new_template("child").parse("{{shout word}}").unwrap();

        assert_eq!(render(&child, &json!({"word": "<hi>"})), "<HI>!");
    }

    #[test]
    fn test_func_can_parse_into_namespace_while_executing() {
        let root = Template::new("root");
        let handle = root.clone();
        let root = root
            .funcs(&FuncMap::new().with("define", move |args: &[Value]| {
                let body = args.first().and_then(Value::as_str).unwrap_or_default();
                handle.new_template("defined").parse(body)?;
                Ok(Value::Null)
            }))
            .parse("{{define \"late\"}}root")
            .unwrap();

        assert_eq!(render(&root, &json!({})), "root");
        assert_eq!(render(&root.lookup("defined").unwrap(), &json!({})), "late");
    }
}
