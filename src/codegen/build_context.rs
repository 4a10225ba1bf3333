use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Define {
    pub name: String,
    pub value: Option<String>,
}

impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "-D{}={}", self.name, value),
            None => write!(f, "-D{}", self.name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    pub version: Option<String>,
}

/// Everything the wiring step asks of the firmware build.
///
/// Defines, flags and libraries are de-duplicated; the first registration wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildContext {
    components: Vec<String>,
    libraries: Vec<Library>,
    defines: Vec<Define>,
    build_flags: Vec<String>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_component(&mut self, id: &str) {
        if !self.components.iter().any(|c| c == id) {
            log::debug!("Registered component '{id}'");
            self.components.push(id.to_string());
        }
    }

    pub fn add_library(&mut self, name: &str, version: Option<&str>) {
        if self.libraries.iter().any(|l| l.name == name) {
            return;
        }
        self.libraries.push(Library {
            name: name.to_string(),
            version: version.map(String::from),
        });
    }

    pub fn add_define(&mut self, name: &str, value: Option<&dyn fmt::Display>) {
        if let Some(existing) = self.defines.iter().find(|d| d.name == name) {
            log::debug!("Define {} already set, keeping {}", name, existing);
            return;
        }
        self.defines.push(Define {
            name: name.to_string(),
            value: value.map(|v| v.to_string()),
        });
    }

    pub fn add_build_flag(&mut self, flag: impl Into<String>) {
        let flag = flag.into();
        if !self.build_flags.contains(&flag) {
            self.build_flags.push(flag);
        }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// Compiler flags: defines first, then raw build flags.
    pub fn build_flags(&self) -> Vec<String> {
        self.defines
            .iter()
            .map(Define::to_string)
            .chain(self.build_flags.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_deduplicated() {
        let mut ctx = BuildContext::new();
        ctx.add_define("USE_ESPHOME", None);
        ctx.add_define("USE_ESPHOME", None);
        ctx.add_define("ANSWER", Some(&42));
        ctx.add_build_flag("-DGDO0=4");
        ctx.add_build_flag("-DGDO0=4");
        assert_eq!(
            ctx.build_flags(),
            vec!["-DUSE_ESPHOME", "-DANSWER=42", "-DGDO0=4"]
        );
    }

    #[test]
    fn test_libraries_and_components() {
        let mut ctx = BuildContext::new();
        ctx.add_library("SPI", None);
        ctx.add_library("SPI", Some("2.0"));
        ctx.register_component("meter");
        ctx.register_component("meter");
        assert_eq!(ctx.libraries().len(), 1);
        assert_eq!(ctx.libraries()[0].version, None);
        assert_eq!(ctx.components(), ["meter".to_string()]);
    }
}
