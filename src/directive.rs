//! `@include(if: …)` / `@skip(if: …)` clauses.
use crate::encode::write_argument;
use crate::error::Result;
use crate::format::Layout;
use crate::parameter::{Argument, Parameter};

/// Conditional-inclusion clauses attached to a field or a whole selection.
/// Both may be present; `include` always renders before `skip`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Directives {
    include_if: Option<Argument>,
    skip_if: Option<Argument>,
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_if(mut self, condition: &Parameter<bool>) -> Self {
        self.include_if = Some(condition.to_argument());
        self
    }

    pub fn skip_if(mut self, condition: &Parameter<bool>) -> Self {
        self.skip_if = Some(condition.to_argument());
        self
    }

    pub(crate) fn set_include_if(&mut self, condition: Option<&Parameter<bool>>) {
        self.include_if = condition.map(Parameter::to_argument);
    }

    pub(crate) fn set_skip_if(&mut self, condition: Option<&Parameter<bool>>) {
        self.skip_if = condition.map(Parameter::to_argument);
    }

    pub fn is_empty(&self) -> bool {
        self.include_if.is_none() && self.skip_if.is_none()
    }

    pub(crate) fn write(&self, out: &mut String, layout: Layout) -> Result<()> {
        for (name, condition) in [("include", &self.include_if), ("skip", &self.skip_if)] {
            if let Some(condition) = condition {
                out.push_str(layout.space());
                out.push('@');
                out.push_str(name);
                out.push_str("(if:");
                out.push_str(layout.space());
                write_argument(out, condition, layout, 0)?;
                out.push(')');
            }
        }
        Ok(())
    }
}
