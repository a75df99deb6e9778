//! Per-run translation state.
//!
//! Earlier passes record what they learned about the program here — which
//! enums became sealed classes, which call sites need API-name rewrites —
//! and the emitter reads it back during translation. A context belongs to
//! one run; independent runs use independent contexts, which also makes
//! concurrent translations safe.

use skt_ast::{CallData, ExpressionKind, FunctionDeclaration};
use tracing::debug;

/// A call-site translation recorded by an earlier pass: when a call to
/// `source_api_name` with the given type is emitted, `prefix` replaces the
/// function name and `parameters` replace the argument labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTranslation {
    pub source_api_name: String,
    pub type_name: String,
    pub prefix: String,
    pub parameters: Vec<String>,
}

/// The registries consulted during emission. All writers are append-only;
/// lookups are linear scans where insertion order decides ties.
#[derive(Debug, Clone, Default)]
pub struct TranslationContext {
    sealed_classes: Vec<String>,
    enum_classes: Vec<String>,
    protocols: Vec<String>,
    function_translations: Vec<FunctionTranslation>,
    pure_functions: Vec<FunctionDeclaration>,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sealed_class(&mut self, name: impl Into<String>) {
        self.sealed_classes.push(name.into());
    }

    pub fn is_sealed_class(&self, name: &str) -> bool {
        self.sealed_classes.iter().any(|sealed| sealed == name)
    }

    pub fn add_enum_class(&mut self, name: impl Into<String>) {
        self.enum_classes.push(name.into());
    }

    pub fn is_enum_class(&self, name: &str) -> bool {
        self.enum_classes.iter().any(|class| class == name)
    }

    pub fn add_protocol(&mut self, name: impl Into<String>) {
        self.protocols.push(name.into());
    }

    pub fn is_protocol(&self, name: &str) -> bool {
        self.protocols.iter().any(|protocol| protocol == name)
    }

    pub fn add_function_translation(&mut self, translation: FunctionTranslation) {
        debug!(
            name = %translation.source_api_name,
            prefix = %translation.prefix,
            "recording function translation"
        );
        self.function_translations.push(translation);
    }

    /// First recorded translation whose API name starts with `name` and
    /// whose type matches exactly. The prefix match is what lets a
    /// parameter-labelled name like `f(_:_:)` answer a query for `f`.
    pub fn get_function_translation(
        &self,
        name: &str,
        type_name: &str,
    ) -> Option<&FunctionTranslation> {
        self.function_translations.iter().find(|translation| {
            translation.source_api_name.starts_with(name) && translation.type_name == type_name
        })
    }

    pub fn add_pure_function(&mut self, declaration: FunctionDeclaration) {
        self.pure_functions.push(declaration);
    }

    /// Whether the call resolves to a function recorded as pure. Dot chains
    /// are peeled down to the rightmost reference before matching.
    pub fn is_referencing_pure_function(&self, call: &CallData) -> bool {
        let mut function_expression = &*call.function;
        while let ExpressionKind::Dot { right, .. } = &function_expression.kind {
            function_expression = right;
        }

        if let ExpressionKind::DeclarationReference(reference) = &function_expression.kind {
            return self.pure_functions.iter().any(|function| {
                reference.identifier.starts_with(&function.prefix)
                    && reference.type_name == function.function_type
            });
        }
        false
    }
}
