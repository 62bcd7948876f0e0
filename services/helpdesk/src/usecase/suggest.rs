use crate::domain::repository::{CompletionPort, QuestionRepository};
use crate::error::HelpdeskError;

/// How many characters of the input text seed the heuristic suggestions.
const SNIPPET_LEN: usize = 80;

/// How many recent question titles feed the draft-answer context.
const CONTEXT_TITLES: u64 = 5;

/// Char-safe prefix of `text` with newlines flattened to spaces.
fn snippet(text: &str) -> String {
    text.chars()
        .take(SNIPPET_LEN)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// The fixed heuristic suggestion set: scope clarification, reproduction
/// request, tags/environment request.
pub fn generate_suggestions(text: &str) -> Vec<String> {
    let base = snippet(text);
    vec![
        format!("Clarify the problem scope related to: '{base}...'"),
        "Share sample input/output so helpers can reproduce.".to_owned(),
        "Add relevant tags and environment details (OS, versions).".to_owned(),
    ]
}

/// Context block for the draft-answer prompt: numbered related titles plus
/// a fixed instruction footer.
pub fn build_context_snippet(related_titles: &[String]) -> String {
    let mut ctx = String::from("Similar questions (titles):\n");
    for (i, title) in related_titles.iter().enumerate() {
        ctx.push_str(&format!("{}. {title}\n", i + 1));
    }
    ctx.push_str("\nAnswer the user clearly with steps and code if relevant.");
    ctx
}

/// Deterministic placeholder answer used without an API key or when fake
/// mode is forced.
pub fn fake_ai_answer(question_title: &str, ctx: &str) -> String {
    format!(
        "(FAKE-AI) Draft for: {question_title}\n\n\
         - Check docs/FAQ.\n- Try common fixes.\n- Context seen:\n{ctx}"
    )
}

fn answer_prompt(question_title: &str, ctx: &str) -> String {
    format!(
        "You are a helpful support agent for a developer helpdesk.\n\
         User Question: {question_title}\n\n\
         Context:\n{ctx}\n\n\
         Write a concise, accurate answer. If you're unsure, state assumptions. \
         Prefer bullet points and short code snippets where helpful."
    )
}

// ── Suggest (heuristic) ──────────────────────────────────────────────────────

pub struct SuggestUseCase<Q: QuestionRepository> {
    pub repo: Q,
}

impl<Q: QuestionRepository> SuggestUseCase<Q> {
    /// Input priority: explicit request text, then the question's own
    /// title + body.
    pub async fn execute(
        &self,
        question_id: i32,
        text: Option<String>,
    ) -> Result<Vec<String>, HelpdeskError> {
        let question = self
            .repo
            .find_by_id(question_id)
            .await?
            .ok_or(HelpdeskError::QuestionNotFound)?;

        let text = text
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("{}\n{}", question.title, question.body));

        Ok(generate_suggestions(text.trim()))
    }
}

// ── DraftAnswer (LLM-backed with graceful degradation) ───────────────────────

pub struct DraftAnswerUseCase<Q, C>
where
    Q: QuestionRepository,
    C: CompletionPort,
{
    pub repo: Q,
    /// `None` when no API credential is configured.
    pub completion: Option<C>,
    pub force_fake: bool,
}

impl<Q, C> DraftAnswerUseCase<Q, C>
where
    Q: QuestionRepository,
    C: CompletionPort,
{
    /// Resolve an answer draft. Backend errors degrade to a diagnostic
    /// string; only a missing question fails the request.
    pub async fn execute(&self, question_id: i32) -> Result<String, HelpdeskError> {
        let question = self
            .repo
            .find_by_id(question_id)
            .await?
            .ok_or(HelpdeskError::QuestionNotFound)?;

        let related: Vec<String> = self
            .repo
            .recent(CONTEXT_TITLES + 1)
            .await?
            .into_iter()
            .filter(|q| q.id != question.id)
            .take(CONTEXT_TITLES as usize)
            .map(|q| q.title)
            .collect();
        let ctx = build_context_snippet(&related);

        let completion = match &self.completion {
            Some(completion) if !self.force_fake => completion,
            _ => return Ok(fake_ai_answer(&question.title, &ctx)),
        };

        let prompt = answer_prompt(&question.title, &ctx);
        match completion.complete(&prompt).await {
            Ok(answer) => Ok(answer.trim().to_owned()),
            Err(e) => Ok(format!("(AI error) Could not fetch AI answer: {e}")),
        }
    }
}
