//! Page configuration.
//!
//! A page is a header, an intro and an ordered list of sections. The built-in
//! default describes the Gemma portfolio; any other page can be loaded from a
//! JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PageError, PageResult};

/// Configuration for one portfolio page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Document title
    pub title: String,

    /// Icon shown before the title
    #[serde(default)]
    pub icon: Option<String>,

    /// Main header text
    pub header: String,

    /// Markdown shown under the header
    #[serde(default)]
    pub intro: String,

    /// Escape raw HTML in notebook markdown instead of passing it through.
    ///
    /// Notebooks are trusted by default.
    #[serde(default)]
    pub escape_raw_html: bool,

    /// Page sections, in display order
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Directory relative asset paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// One titled section of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub title: String,

    /// Markdown shown under the heading
    #[serde(default)]
    pub body: String,

    /// What else the section shows
    #[serde(flatten)]
    pub kind: SectionKind,
}

/// Section content beyond the heading and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionKind {
    /// Prose only, optionally in a highlighted box.
    Prose {
        #[serde(default)]
        highlight: bool,
    },

    /// A static image.
    Screenshot { path: PathBuf, caption: String },

    /// A notebook with download link, overview tab and rendered content tab.
    Notebook { path: PathBuf, overview: String },

    /// Two markdown columns side by side.
    Columns { left: String, right: String },
}

impl PageConfig {
    /// Load a config from a JSON file.
    ///
    /// Relative asset paths in the config resolve against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PageError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config: Self =
            serde_json::from_str(&content).map_err(|source| PageError::ConfigError {
                path: path.to_path_buf(),
                source,
            })?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Serialize the config as pretty JSON.
    pub fn to_json(&self) -> PageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve an asset path against [`PageConfig::base_dir`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// All asset files the page reads, resolved.
    pub fn asset_paths(&self) -> Vec<PathBuf> {
        self.sections
            .iter()
            .filter_map(|section| match &section.kind {
                SectionKind::Screenshot { path, .. } | SectionKind::Notebook { path, .. } => {
                    Some(self.resolve(path))
                }
                SectionKind::Prose { .. } | SectionKind::Columns { .. } => None,
            })
            .collect()
    }
}

impl Section {
    fn prose(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            kind: SectionKind::Prose { highlight: false },
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Gemma Model Project".to_string(),
            icon: Some("🤖".to_string()),
            header: "Gemma Language Model Implementation".to_string(),
            intro: "This project demonstrates my implementation of Google's Gemma language model for \
natural language processing tasks. While the full model can't be deployed permanently due to resource constraints, \
this portfolio showcases the development process, implementation details, and results."
                .to_string(),
            escape_raw_html: false,
            sections: vec![
                Section::prose("Project Overview", DEFAULT_OVERVIEW),
                Section::prose("Implementation Details", DEFAULT_IMPLEMENTATION),
                Section {
                    title: "Model Demonstration".to_string(),
                    body: DEFAULT_DEMONSTRATION.to_string(),
                    kind: SectionKind::Screenshot {
                        path: PathBuf::from("Gradio.png"),
                        caption: "Gemma Model Gradio Interface".to_string(),
                    },
                },
                Section {
                    title: "Project Notebook".to_string(),
                    body: DEFAULT_NOTEBOOK.to_string(),
                    kind: SectionKind::Notebook {
                        path: PathBuf::from("Gemma3_Hugging_Face.ipynb"),
                        overview: DEFAULT_NOTEBOOK_OVERVIEW.to_string(),
                    },
                },
                Section {
                    title: "Deployment Challenges".to_string(),
                    body: DEFAULT_CHALLENGES.to_string(),
                    kind: SectionKind::Prose { highlight: true },
                },
                Section::prose(
                    "Future Improvements & Full Deployment Plan",
                    DEFAULT_IMPROVEMENTS,
                ),
                Section {
                    title: "Contact & Additional Information".to_string(),
                    body: String::new(),
                    kind: SectionKind::Columns {
                        left: DEFAULT_CONTACT.to_string(),
                        right: DEFAULT_TECHNOLOGIES.to_string(),
                    },
                },
            ],
            base_dir: PathBuf::new(),
        }
    }
}

const DEFAULT_OVERVIEW: &str = "\
The Gemma model is a state-of-the-art language model developed by Google that excels at various NLP tasks.
This project demonstrates how I:

- Fine-tuned the model for specific use cases
- Built a user-friendly interface using Gradio
- Evaluated performance and optimized for better results
- Addressed deployment challenges with resource-intensive models
";

const DEFAULT_IMPLEMENTATION: &str = "\
The implementation uses Google's Gemma model, which requires significant computational resources.
The model was set up in Google Colab with GPU acceleration to handle the resource requirements.

Key components:
- Model initialization and configuration
- Custom preprocessing pipeline
- Integration with Gradio for the user interface
- Optimization techniques for improved performance
";

const DEFAULT_DEMONSTRATION: &str = "\
Below is a screenshot of the working application deployed on Gradio.
The temporary Gradio deployment was active for 72 hours for testing and demonstration purposes.
";

const DEFAULT_NOTEBOOK: &str = "\
The complete implementation details are available in my Jupyter notebook.
You can explore the notebook content below and download it for further reference.
";

const DEFAULT_NOTEBOOK_OVERVIEW: &str = "\
This notebook contains a complete implementation of the Google Gemma model using Hugging Face's transformers library.
It includes:

- Model setup and initialization
- Tokenizer configuration
- Inference pipeline
- Gradio interface implementation
- Performance evaluation

Switch to the \"Full Notebook Content\" tab to explore the complete code and implementation details.
";

const DEFAULT_CHALLENGES: &str = "\
### Why Full Deployment Wasn't Possible

The Gemma model faces several deployment challenges that are common in large language model projects:

1. **Resource Requirements**: The model requires significant GPU memory and computational power, making it expensive to host continuously.

2. **Gradio's 72-Hour Limit**: Free Gradio deployments are limited to 72 hours, which doesn't allow for permanent hosting.

3. **Cost Constraints**: Maintaining a dedicated GPU instance for continuous deployment would incur substantial monthly costs.

4. **Alternative Solutions**: This portfolio approach allows me to showcase the project's capabilities while acknowledging practical constraints.

These challenges represent real-world considerations in ML engineering that professionals regularly navigate.
";

const DEFAULT_IMPROVEMENTS: &str = "\
With additional resources, I would implement the following improvements:

- Optimize the model for reduced memory footprint using quantization techniques
- Deploy on a dedicated cloud instance with GPU support
- Implement caching and batching for more efficient inference
- Create a more robust API with authentication and usage tracking

The ideal deployment would use a service like AWS SageMaker, Google Cloud AI Platform, or a dedicated
virtual machine with sufficient GPU capabilities.
";

const DEFAULT_CONTACT: &str = "\
For more information about this project or to discuss how I approach machine learning challenges:

- GitHub: [P-256](https://github.com/roboticslover)
- LinkedIn: [Sachin Rathore](https://www.linkedin.com/in/sachin-rathore-97776a283/)
";

const DEFAULT_TECHNOLOGIES: &str = "\
**Technologies Used:**
- Python
- PyTorch
- Hugging Face Transformers
- Google Colab
- Gemma Model
- Gradio
- Streamlit
";
