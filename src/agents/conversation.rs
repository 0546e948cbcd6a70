use super::config::LlmConfig;
use super::models::{ChatMessage, ChatTurn, Role};
use super::port::ChatModel;
use super::prompts;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// A named participant with its own system message.
#[derive(Debug, Clone)]
pub struct Agent {
    pub name: String,
    pub system_message: String,
}

impl Agent {
    pub fn new(name: impl Into<String>, system_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_message: system_message.into(),
        }
    }

    pub fn research() -> Self {
        Self::new(prompts::RESEARCH_AGENT_NAME, prompts::RESEARCH_SYSTEM_MESSAGE)
    }

    pub fn reviewer() -> Self {
        Self::new(prompts::REVIEWER_AGENT_NAME, prompts::REVIEWER_SYSTEM_MESSAGE)
    }
}

/// Research/reviewer exchange over a shared chat model.
pub struct ConversationDriver {
    model: Arc<dyn ChatModel>,
    research: Agent,
    reviewer: Agent,
    max_turns: usize,
}

impl ConversationDriver {
    pub fn new(model: Arc<dyn ChatModel>, config: &LlmConfig) -> Self {
        Self::with_agents(model, Agent::research(), Agent::reviewer(), config.max_turns)
    }

    pub fn with_agents(
        model: Arc<dyn ChatModel>,
        research: Agent,
        reviewer: Agent,
        max_turns: usize,
    ) -> Self {
        Self {
            model,
            research,
            reviewer,
            max_turns,
        }
    }

    /// Open with `prompt` and let the agents reply in turn, research first,
    /// until `max_turns` replies exist. Returns the whole transcript.
    pub async fn run(&self, prompt: &str) -> Result<Vec<ChatTurn>> {
        let mut transcript = vec![ChatTurn {
            speaker: prompts::INITIATOR_NAME.to_string(),
            role: Role::User,
            content: prompt.to_string(),
        }];

        for turn in 0..self.max_turns {
            let speaker = if turn % 2 == 0 { &self.research } else { &self.reviewer };
            let messages = perspective(speaker, &transcript);

            let reply = self
                .model
                .send_conversation_turn(&messages)
                .await
                .with_context(|| format!("{} failed to reply", speaker.name))?;

            info!(agent = %speaker.name, turn = turn + 1, chars = reply.len(), "agent replied");

            transcript.push(ChatTurn {
                speaker: speaker.name.clone(),
                role: Role::Assistant,
                content: reply,
            });
        }

        Ok(transcript)
    }
}

/// The transcript as `agent` sees it: its own turns are `assistant`,
/// everyone else's are `user` tagged with the speaker's name.
pub fn perspective(agent: &Agent, transcript: &[ChatTurn]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(ChatMessage::system(&agent.system_message));

    for turn in transcript {
        if turn.speaker == agent.name {
            messages.push(ChatMessage::assistant(&turn.content));
        } else {
            messages.push(ChatMessage::user(&turn.speaker, &turn.content));
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Echoes which system message it was given and records every request.
    struct ScriptedModel {
        seen: Mutex<Vec<Vec<ChatMessage>>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedModel {
        fn new() -> Self {
            Self { seen: Mutex::new(Vec::new()), fail_on_call: None }
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn send_conversation_turn(&self, messages: &[ChatMessage]) -> Result<String> {
            let mut seen = self.seen.lock().await;
            seen.push(messages.to_vec());
            if self.fail_on_call == Some(seen.len()) {
                anyhow::bail!("backend unavailable");
            }
            let system = &messages[0].content;
            Ok(format!("reply {} from {}", seen.len(), &system[..10]))
        }
    }

    fn agents() -> (Agent, Agent) {
        (
            Agent::new("FinancialResearchAgent", "Researcher prompt"),
            Agent::new("ReviewerAgent", "Reviewer prompt..."),
        )
    }

    #[tokio::test]
    async fn test_two_turn_exchange() {
        let model = Arc::new(ScriptedModel::new());
        let (research, reviewer) = agents();
        let driver = ConversationDriver::with_agents(model.clone(), research, reviewer, 2);

        let transcript = driver.run("Analyze AAPL").await.unwrap();

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].speaker, "User");
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].content, "Analyze AAPL");
        assert_eq!(transcript[1].speaker, "FinancialResearchAgent");
        assert_eq!(transcript[1].content, "reply 1 from Researcher");
        assert_eq!(transcript[2].speaker, "ReviewerAgent");
        assert_eq!(transcript[2].role, Role::Assistant);
        assert_eq!(transcript[2].content, "reply 2 from Reviewer p");

        let seen = model.seen.lock().await;
        // reviewer sees the prompt and the research reply, both as user turns
        let reviewer_view = &seen[1];
        assert_eq!(reviewer_view.len(), 3);
        assert_eq!(reviewer_view[1].name.as_deref(), Some("User"));
        assert_eq!(reviewer_view[2].role, Role::User);
        assert_eq!(reviewer_view[2].name.as_deref(), Some("FinancialResearchAgent"));
    }

    #[tokio::test]
    async fn test_research_sees_own_turns_as_assistant() {
        let model = Arc::new(ScriptedModel::new());
        let (research, reviewer) = agents();
        let driver = ConversationDriver::with_agents(model.clone(), research, reviewer, 3);

        let transcript = driver.run("Analyze MSFT").await.unwrap();
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[3].speaker, "FinancialResearchAgent");

        let seen = model.seen.lock().await;
        let third = &seen[2];
        assert_eq!(third[0].content, "Researcher prompt");
        assert_eq!(third[2].role, Role::Assistant);
        assert!(third[2].name.is_none());
        assert_eq!(third[3].role, Role::User);
    }

    #[tokio::test]
    async fn test_zero_turns_returns_prompt_only() {
        let model = Arc::new(ScriptedModel::new());
        let (research, reviewer) = agents();
        let driver = ConversationDriver::with_agents(model.clone(), research, reviewer, 0);

        let transcript = driver.run("hello").await.unwrap();
        assert_eq!(transcript.len(), 1);
        assert!(model.seen.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let model = Arc::new(ScriptedModel { seen: Mutex::new(Vec::new()), fail_on_call: Some(2) });
        let (research, reviewer) = agents();
        let driver = ConversationDriver::with_agents(model, research, reviewer, 2);

        let err = driver.run("Analyze AAPL").await.unwrap_err();
        assert!(err.to_string().contains("ReviewerAgent"));
    }

    #[test]
    fn test_default_agents_use_configured_turn_budget() {
        let driver = ConversationDriver::new(Arc::new(ScriptedModel::new()), &LlmConfig::new("k"));
        assert_eq!(driver.max_turns, 2);
        assert_eq!(driver.research.name, "FinancialResearchAgent");
        assert_eq!(driver.reviewer.name, "ReviewerAgent");
    }
}
