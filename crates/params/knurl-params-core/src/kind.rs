//! The statically compiled table of concrete parameter kinds.
//!
//! Kinds replace a dynamic factory registry: each one fixes the stable
//! type-name string used by serialized projects, whether its dimensions may
//! carry keyframes, which value tag its dimensions accept, and whether its
//! content participates in the change fingerprint.

use serde::{Deserialize, Serialize};

use crate::curve::Interpolation;
use knurl_api_core::{Value, ValueKind};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Int,
    Double,
    Bool,
    /// Enumerated entry list (combo box); the value is an entry index.
    Choice,
    /// 1 (grayscale), 3 (RGB) or 4 (RGBA) double channels; never 2.
    Color,
    Text,
    RichText,
    /// Input file selector; holds the selected file list.
    File,
    OutputFile,
    Button,
    Separator,
    /// Named grouping of other parameters (containment via `parent` links).
    Group,
    /// Tab-level grouping for the panel layout.
    Page,
}

impl ParamKind {
    /// Stable factory string, as written into serialized projects.
    pub fn type_name(self) -> &'static str {
        match self {
            ParamKind::Int => "Int",
            ParamKind::Double => "Double",
            ParamKind::Bool => "Bool",
            ParamKind::Choice => "ComboBox",
            ParamKind::Color => "Color",
            ParamKind::Text => "String",
            ParamKind::RichText => "RichText",
            ParamKind::File => "InputFile",
            ParamKind::OutputFile => "OutputFile",
            ParamKind::Button => "Button",
            ParamKind::Separator => "Separator",
            ParamKind::Group => "Group",
            ParamKind::Page => "Tab",
        }
    }

    /// Reverse lookup over the compiled table.
    pub fn from_type_name(name: &str) -> Option<ParamKind> {
        match name {
            "Int" => Some(ParamKind::Int),
            "Double" => Some(ParamKind::Double),
            "Bool" => Some(ParamKind::Bool),
            "ComboBox" => Some(ParamKind::Choice),
            "Color" => Some(ParamKind::Color),
            "String" => Some(ParamKind::Text),
            "RichText" => Some(ParamKind::RichText),
            "InputFile" => Some(ParamKind::File),
            "OutputFile" => Some(ParamKind::OutputFile),
            "Button" => Some(ParamKind::Button),
            "Separator" => Some(ParamKind::Separator),
            "Group" => Some(ParamKind::Group),
            "Tab" => Some(ParamKind::Page),
            _ => None,
        }
    }

    /// Whether dimensions of this kind may carry keyframes. File selectors,
    /// buttons, separators, groups, text and booleans never animate.
    pub fn can_animate(self) -> bool {
        matches!(self, ParamKind::Int | ParamKind::Double | ParamKind::Color)
    }

    /// The single value tag legal for this kind's dimensions.
    pub fn value_kind(self) -> ValueKind {
        match self {
            ParamKind::Int => ValueKind::Int,
            ParamKind::Double | ParamKind::Color => ValueKind::Double,
            ParamKind::Bool | ParamKind::Button | ParamKind::Separator => ValueKind::Bool,
            ParamKind::Group | ParamKind::Page => ValueKind::Bool,
            ParamKind::Choice => ValueKind::Index,
            ParamKind::Text | ParamKind::RichText | ParamKind::OutputFile => ValueKind::Text,
            ParamKind::File => ValueKind::TextList,
        }
    }

    /// Default per-dimension value for freshly declared parameters.
    pub fn default_value(self) -> Value {
        match self.value_kind() {
            ValueKind::Int => Value::Int(0),
            ValueKind::Double => Value::Double(0.0),
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Text => Value::Text(String::new()),
            ValueKind::Index => Value::Index(0),
            ValueKind::TextList => Value::TextList(Vec::new()),
        }
    }

    /// Interpolation mode for lazily created curves of this kind.
    pub fn default_interpolation(self) -> Interpolation {
        if self.value_kind().is_numeric() {
            Interpolation::Linear
        } else {
            Interpolation::Constant
        }
    }

    /// Layout-only kinds contribute nothing but their tag to the fingerprint.
    pub fn hashed(self) -> bool {
        !matches!(
            self,
            ParamKind::Button | ParamKind::Separator | ParamKind::Group | ParamKind::Page
        )
    }
}
