use std::fmt::Display;

use crate::definition::DeclarationP;

/// A parsed source file: its declarations, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleP {
    pub declarations: Vec<DeclarationP>,
}

impl Display for ModuleP {
    /// One declaration per line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "{}", declaration)?;
        }
        Ok(())
    }
}
