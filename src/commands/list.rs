use anyhow::Result;
use template_interface::Kind;

use super::Sources;
use crate::output;

pub struct ListCommand;

impl ListCommand {
    /// Print the name of every template the sources define
    pub fn execute(kind: Kind, sources: &Sources) -> Result<()> {
        let root = sources.load(kind.new_template("").as_ref())?;
        let templates = root.templates();

        for template in &templates {
            println!("{}", template.name());
        }
        output::info(&format!("{} {} template(s)", templates.len(), kind));

        Ok(())
    }
}
