//! Prompt templates for each LLM call in the pipeline.
//!
//! Prompts are written in Korean because the service targets Korean news articles; the
//! fixed fallback answer in the QA prompt is matched by downstream consumers verbatim.

/// Answer the QA prompt instructs the model to give when the summary lacks the information.
pub const NO_INFORMATION_ANSWER: &str = "문서에 해당 정보 없음";

/// Token budgets per call type.
pub(crate) const CHUNK_SUMMARY_MAX_TOKENS: u32 = 320;
pub(crate) const MERGE_SUMMARY_MAX_TOKENS: u32 = 600;
pub(crate) const QA_MAX_TOKENS: u32 = 250;
pub(crate) const OPINION_MAX_TOKENS: u32 = 250;
pub(crate) const QUICK_SUMMARY_MAX_TOKENS: u32 = 400;

/// Number of keywords requested from the merge call.
pub(crate) const KEYWORD_COUNT: usize = 8;

/// Fact-extraction prompt for one chunk. `index` is zero-based.
pub(crate) fn chunk_summary_prompt(index: usize, total: usize, chunk: &str) -> String {
    format!(
        "너는 뉴스 요약 에이전트다.\n\
         다음은 뉴스 기사 일부다. 사실 중심으로 핵심만 간결하게 요약해라.\n\
         - 과장/추론 금지, 기사에 있는 내용만.\n\
         - 숫자/날짜/고유명사(인물, 기관, 장소)는 가능하면 보존.\n\n\
         [기사 일부 {part}/{total}]\n\
         {chunk}\n\n\
         [출력]\n\
         - 3~5줄 요약(문장형)\n",
        part = index + 1,
    )
}

/// Merge prompt combining all partial summaries.
pub(crate) fn merge_summary_prompt(partials: &str, max_bullets: usize) -> String {
    format!(
        "너는 뉴스 통합 요약 에이전트다.\n\
         아래는 부분 요약들을 합친 내용이다. 중복을 제거하고 핵심만 남겨 통합 요약해라.\n\n\
         [부분 요약들]\n\
         {partials}\n\n\
         [출력 형식]\n\
         1) 한 문단 요약(3~5문장)\n\
         2) 핵심 불릿 {max_bullets}개 (각 1문장, 사실 중심)\n\
         3) 키워드 {KEYWORD_COUNT}개 (쉼표로 구분)\n"
    )
}

/// Question answering restricted to the final summary.
pub(crate) fn qa_prompt(summary: &str, question: &str) -> String {
    format!(
        "다음은 뉴스 요약이다. 요약에 포함된 정보만 사용해 질문에 답해라.\n\
         - 추론/상상 금지\n\
         - 요약에 근거가 없으면: \"{NO_INFORMATION_ANSWER}\"\n\n\
         [요약]\n\
         {summary}\n\n\
         [질문]\n\
         {question}\n\n\
         [답변]\n"
    )
}

/// JSON-only sentiment and key-point extraction.
pub(crate) fn opinion_prompt(summary: &str) -> String {
    format!(
        "반드시 JSON만 출력해라. 다른 텍스트 절대 금지.\n\n\
         [요약]\n\
         {summary}\n\n\
         [JSON 출력 형식]\n\
         {{\n  \"sentiment\": \"positive | negative | neutral\",\n  \"key_points\": [\"...\", \"...\", \"...\", \"...\", \"...\"]\n}}\n"
    )
}

/// Single-call five-line summary used by the quick summarize endpoint.
pub(crate) fn quick_summary_prompt(text: &str) -> String {
    format!("다음 뉴스 핵심을 5줄로 요약해줘:\n\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_prompt_states_one_based_position() {
        let prompt = chunk_summary_prompt(1, 3, "본문 내용");
        assert!(prompt.contains("[기사 일부 2/3]"));
        assert!(prompt.contains("본문 내용"));
        assert!(prompt.contains("숫자/날짜/고유명사"));
    }

    #[test]
    fn merge_prompt_requests_bullets_and_keywords() {
        let prompt = merge_summary_prompt("요약 A\n요약 B", 7);
        assert!(prompt.contains("핵심 불릿 7개"));
        assert!(prompt.contains("키워드 8개"));
        assert!(prompt.contains("요약 A\n요약 B"));
    }

    #[test]
    fn qa_prompt_embeds_fallback_sentence() {
        let prompt = qa_prompt("요약", "누가?");
        assert!(prompt.contains(NO_INFORMATION_ANSWER));
        assert!(prompt.contains("[질문]\n누가?"));
    }

    #[test]
    fn opinion_prompt_shows_json_shape() {
        let prompt = opinion_prompt("요약");
        assert!(prompt.contains("\"sentiment\": \"positive | negative | neutral\""));
        assert!(prompt.contains("\"key_points\""));
    }
}
