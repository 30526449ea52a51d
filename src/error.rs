use thiserror::Error;

/// Errors surfaced to the person asking for a recipe.
///
/// The `Display` text of every variant is the message shown to the user, so it
/// never carries technical detail. Underlying causes are logged where they occur.
#[derive(Error, Debug)]
pub enum GenieError {
    /// The ingredients input was empty or only whitespace
    #[error("Por favor, insira alguns ingredientes.")]
    EmptyInput,

    /// The model credential (or another required setting) is missing
    #[error("A chave da API não está configurada.")]
    Configuration,

    /// The configuration file or environment could not be read
    #[error("Configuração inválida: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// The model answered with JSON that does not describe a complete recipe
    #[error("Formato de receita inválido recebido da API.")]
    Validation,

    /// Any other failure while generating the recipe
    #[error("Falha ao gerar a receita. O modelo pode estar indisponível ou os ingredientes eram muito incomuns. Por favor, tente novamente.")]
    Generation,
}

impl GenieError {
    /// True for errors caused by missing or broken configuration rather than a single request
    pub fn is_configuration(&self) -> bool {
        matches!(self, GenieError::Configuration | GenieError::ConfigLoad(_))
    }
}

/// Technical failures of a call to the generative model.
///
/// These are logged for diagnostics and then collapsed into [`GenieError::Generation`].
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure or undecodable response body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status or an error object
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response did not contain any generated text
    #[error("No content in model response: {0}")]
    MissingContent(String),
}
