use std::path::{Path, PathBuf};

use regex::Regex;

use crate::LifeError;

#[derive(Default, Debug, PartialEq, Eq)]
pub struct ShaderImports {
    imports: Vec<String>,
    import_path: Option<String>,
}

impl ShaderImports {
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn import_path(&self) -> Option<&str> {
        self.import_path.as_deref()
    }
}

/// Loads WGSL from disk and splices in `#import file.wgsl` lines. A
/// `#define_import_path dir` line makes imports resolve relative to `dir`
/// under the shader root.
pub struct ShaderImportProcessor {
    root: PathBuf,
    import_custom_path_regex: Regex,
    define_import_path_regex: Regex,
}

impl Default for ShaderImportProcessor {
    fn default() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/shaders"))
    }
}

impl ShaderImportProcessor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            import_custom_path_regex: Regex::new(r"^\s*#\s*import\s+(\S+)")
                .expect("import regex is valid"),
            define_import_path_regex: Regex::new(r"^\s*#\s*define_import_path\s+(\S+)")
                .expect("define_import_path regex is valid"),
        }
    }

    pub fn load_shader(
        &self,
        device: &wgpu::Device,
        shader_path: &str,
        label: Option<&str>,
    ) -> Result<wgpu::ShaderModule, LifeError> {
        let shader = self.load_source(shader_path)?;
        log::debug!("Loaded shader {} ({} bytes)", shader_path, shader.len());

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label,
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(&shader)),
        }))
    }

    pub fn get_imports_from_str(&self, shader: &str) -> ShaderImports {
        let mut shader_imports = ShaderImports::default();
        for line in shader.lines() {
            if let Some(path) = self
                .define_import_path_regex
                .captures(line)
                .and_then(|cap| cap.get(1))
            {
                shader_imports.import_path = Some(path.as_str().to_string());
            } else if let Some(import) = self
                .import_custom_path_regex
                .captures(line)
                .and_then(|cap| cap.get(1))
            {
                shader_imports.imports.push(import.as_str().to_string());
            }
        }

        shader_imports
    }

    /// Shader source with every import line replaced by the imported file.
    pub fn load_source(&self, shader_path: &str) -> Result<String, LifeError> {
        let source = read_shader_file(&self.root.join(shader_path))?;

        let imports = self.get_imports_from_str(&source);
        let import_root = match imports.import_path() {
            Some(path) => self.root.join(path),
            None => self.root.clone(),
        };

        let mut shader = String::with_capacity(source.len());
        for line in source.lines() {
            // The directive is not WGSL
            if self.define_import_path_regex.is_match(line) {
                continue;
            }
            match self
                .import_custom_path_regex
                .captures(line)
                .and_then(|cap| cap.get(1))
            {
                Some(import) => {
                    let import_contents = read_shader_file(&import_root.join(import.as_str()))?;
                    shader.push_str(&import_contents);
                }
                None => shader.push_str(line),
            }
            shader.push('\n');
        }

        Ok(shader)
    }
}

fn read_shader_file(path: &Path) -> Result<String, LifeError> {
    std::fs::read_to_string(path).map_err(|err| {
        log::error!("Failed to read shader file: {} {}", path.display(), err);
        LifeError::ShaderError {
            path: path.to_path_buf(),
            source: err,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gol_cells_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(dir.join("common")).unwrap();
        dir
    }

    #[test]
    fn imports_are_collected() {
        let processor = ShaderImportProcessor::new(".");
        let imports = processor.get_imports_from_str(
            "#define_import_path common\n#import cell.wgsl\n  # import palette.wgsl\nfn main() {}",
        );
        assert_eq!(imports.import_path(), Some("common"));
        assert_eq!(imports.imports(), ["cell.wgsl", "palette.wgsl"]);
    }

    #[test]
    fn imports_are_spliced_in() {
        let dir = scratch_dir("splice");
        std::fs::write(dir.join("common/consts.wgsl"), "const SIDE: f32 = 10.0;").unwrap();
        std::fs::write(
            dir.join("main.wgsl"),
            "#define_import_path common\n#import consts.wgsl\nfn side() -> f32 { return SIDE; }",
        )
        .unwrap();

        let source = ShaderImportProcessor::new(&dir)
            .load_source("main.wgsl")
            .unwrap();
        assert_eq!(
            source,
            "const SIDE: f32 = 10.0;\nfn side() -> f32 { return SIDE; }\n"
        );
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_shader_is_an_error() {
        let dir = scratch_dir("missing");
        let err = ShaderImportProcessor::new(&dir)
            .load_source("nope.wgsl")
            .unwrap_err();
        assert!(matches!(err, LifeError::ShaderError { .. }));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn bundled_cell_shader_resolves() {
        let source = ShaderImportProcessor::default()
            .load_source("cell.wgsl")
            .unwrap();
        assert!(source.contains("struct CellConstants"));
        assert!(!source.contains("#import"));
    }
}
