use tera::Tera;
use std::sync::Mutex;
use anyhow::Result;
use std::path::PathBuf;

/// HTML page templates loaded from `<base_path>/**/*.html`.
pub struct TemplateEngine {
    tera: Mutex<Tera>,
}

impl TemplateEngine {
    pub fn new(base_path: PathBuf) -> Result<Self> {
        if !base_path.exists() {
            return Err(anyhow::anyhow!("template directory {} does not exist", base_path.display()));
        }

        let pattern = format!("{}/**/*.html", base_path.to_string_lossy());
        let tera = Tera::new(&pattern)?;

        Ok(Self {
            tera: Mutex::new(tera),
        })
    }

    pub fn render(&self, template_name: &str, context: &tera::Context) -> Result<String> {
        let tera = self.tera.lock().map_err(|_| anyhow::anyhow!("template engine lock poisoned"))?;
        let template_file = format!("{}.html", template_name);
        tera.render(&template_file, context).map_err(|e| {
            let loaded = tera.get_template_names().collect::<Vec<_>>();
            anyhow::anyhow!("Tera Render Error: {}. Requested: '{}'. Loaded: {:?}", e, template_file, loaded)
        })
    }
}
