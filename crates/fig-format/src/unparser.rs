//! Package definition printer

use std::io::{self, Write};

use fig_pm::Package;

/// Writes packages in the definition format read by [`crate::parse_package`]
pub struct Unparser<W: Write> {
    out: W,
}

impl<W: Write> Unparser<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print a package: header, then each config in declaration order with
    /// fully qualified includes
    pub fn unparse_package(&mut self, package: &Package) -> io::Result<()> {
        writeln!(self.out, "package {}/{}", package.name, package.version)?;

        for config in package.configs.values() {
            writeln!(self.out)?;
            writeln!(self.out, "config {}", config.name)?;
            for include in &config.includes {
                writeln!(
                    self.out,
                    "  include {}/{}:{}",
                    include.package, include.version, include.config
                )?;
            }
            writeln!(self.out, "end")?;
        }

        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render a package definition to a string
pub fn package_to_string(package: &Package) -> String {
    let mut unparser = Unparser::new(Vec::new());
    // Writing into a Vec cannot fail
    let _ = unparser.unparse_package(package);
    String::from_utf8_lossy(&unparser.into_inner()).into_owned()
}
