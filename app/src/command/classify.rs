use pokedex_core::classify;

#[derive(Debug, Clone)]
pub struct ClassifyInput {
    pub text: String,
}

/// Strategy that prints the intent a line of text classifies to, as the
/// JSON a relay would receive. Needs neither config nor network.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyStrategy;

impl super::CommandStrategy for ClassifyStrategy {
    type Input = ClassifyInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let intent = classify(&input.text);
        println!("{}", serde_json::to_string_pretty(&intent)?);
        Ok(())
    }
}
