//! Prompt building functions for text-generation requests

use crate::domain::value_objects::{ContentAnalysis, Script};

/// Build the content-structure analysis prompt.
///
/// The model is asked for a JSON object; the caller parses it with a
/// heuristic fallback, so the exact response format is a request, not a
/// guarantee.
pub fn build_analysis_prompt(content: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Analise o seguinte conteúdo usando a metodologia Kurzgesagt quantificada:\n\n");
    prompt.push_str("CONTEÚDO:\n");
    prompt.push_str(content);
    prompt.push_str("\n\nANÁLISE REQUERIDA:\n");
    prompt.push_str("1. HOOK INICIAL (0-15s): Identifique o potencial para criar um hook envolvente\n");
    prompt.push_str("2. CONTEXTUALIZAÇÃO (15-45s): Determine como estabelecer relevância pessoal\n");
    prompt.push_str("3. DESENVOLVIMENTO: Identifique conceitos complexos que precisam de analogias\n");
    prompt.push_str("4. SÍNTESE FINAL: Sugira mensagem de empoderamento\n\n");
    prompt.push_str("FILOSOFIA NIHILISMO OTIMISTA:\n");
    prompt.push_str("- Reconheça a complexidade sem simplificar excessivamente\n");
    prompt.push_str("- Balance otimismo com realismo científico\n");
    prompt.push_str("- Conecte problemas individuais com contexto universal\n\n");
    prompt.push_str("Retorne uma análise estruturada em JSON com:\n");
    prompt.push_str("- hook_potential: pontuação 0-10\n");
    prompt.push_str("- complexity_level: baixo/médio/alto\n");
    prompt.push_str("- target_audience: descrição\n");
    prompt.push_str("- key_concepts: lista de conceitos principais\n");
    prompt.push_str("- analogy_opportunities: sugestões de analogias visuais\n");
    prompt.push_str("- emotional_tone: tom emocional apropriado\n");
    prompt.push_str("- scientific_accuracy: verificação de precisão científica\n");

    prompt
}

/// Build the script-generation prompt from a content analysis.
///
/// Missing analysis fields degrade to the documented defaults instead of
/// failing the request.
pub fn build_script_prompt(analysis: &ContentAnalysis) -> String {
    let hook_potential = analysis.hook_potential.unwrap_or(7.0);
    let complexity = analysis
        .complexity_level
        .map(|c| c.to_string())
        .unwrap_or_else(|| "médio".to_string());

    let mut prompt = String::new();

    prompt.push_str(
        "Gere um roteiro de vídeo educacional seguindo a METODOLOGIA KURZGESAGT QUANTIFICADA:\n\n",
    );
    prompt.push_str("ANÁLISE DO CONTEÚDO:\n");
    prompt.push_str(&format!("- Hook Potential: {}\n", hook_potential));
    prompt.push_str(&format!("- Complexidade: {}\n", complexity));
    prompt.push_str(&format!(
        "- Conceitos-chave: {}\n",
        analysis.key_concepts.join(", ")
    ));
    prompt.push_str(&format!(
        "- Oportunidades de analogia: {}\n\n",
        analysis.analogy_opportunities.join(", ")
    ));
    prompt.push_str("ESTRUTURA OBRIGATÓRIA:\n\n");
    prompt.push_str("1. HOOK INICIAL (0-15 segundos) - 89% retenção comprovada:\n");
    prompt.push_str("   - Use pergunta provocativa OU estatística surpreendente OU cenário intrigante\n");
    prompt.push_str("   - Primeiros 5s determinam 73% da retenção total\n\n");
    prompt.push_str("2. CONTEXTUALIZAÇÃO (15-45 segundos) - +23% engajamento:\n");
    prompt.push_str("   - Estabeleça relevância pessoal: \"isso afeta você porque...\"\n");
    prompt.push_str("   - Preview da descoberta para manter atenção +40s\n\n");
    prompt.push_str("3. DESENVOLVIMENTO PRINCIPAL:\n");
    prompt.push_str("   - Progressão de complexidade incremental\n");
    prompt.push_str("   - Analogias visuais e comparações de escala\n\n");
    prompt.push_str("4. SÍNTESE FINAL (20-25% do vídeo):\n");
    prompt.push_str("   - Reflexão pessoal, implicações futuras, mensagem de empoderamento\n\n");
    prompt.push_str("FORMATO DE SAÍDA:\n");
    prompt.push_str("[HOOK INICIAL - 0:00-0:15]\n");
    prompt.push_str("[Texto do hook]\n\n");
    prompt.push_str("[CONTEXTUALIZAÇÃO - 0:15-0:45]\n");
    prompt.push_str("[Texto da contextualização]\n\n");
    prompt.push_str("[DESENVOLVIMENTO - 0:45-X:XX]\n");
    prompt.push_str("[Desenvolvimento com seções marcadas]\n\n");
    prompt.push_str("[SÍNTESE FINAL - últimos 20-25%]\n");
    prompt.push_str("[Conclusão com empoderamento]\n");

    prompt
}

/// Build the scientific-accuracy assessment prompt for the quality gate.
pub fn build_content_assessment_prompt(script: &Script, analysis: &ContentAnalysis) -> String {
    let script_json = serde_json::to_string_pretty(script).unwrap_or_default();
    let analysis_json = serde_json::to_string_pretty(analysis).unwrap_or_default();

    let mut prompt = String::new();

    prompt.push_str("Avalie a qualidade científica e precisão do conteúdo:\n\n");
    prompt.push_str("ROTEIRO:\n");
    prompt.push_str(&script_json);
    prompt.push_str("\n\nANÁLISE:\n");
    prompt.push_str(&analysis_json);
    prompt.push_str("\n\nCritérios de avaliação (escala 0-10):\n");
    prompt.push_str("1. RIGOR CIENTÍFICO: Precisão de fatos e conceitos\n");
    prompt.push_str("2. VERIFICAÇÃO DE FATOS: Confiabilidade das informações\n");
    prompt.push_str("3. CONFIABILIDADE DAS FONTES: Qualidade das evidências\n");
    prompt.push_str("4. FUNDAMENTAÇÃO DAS AFIRMAÇÕES: Suporte para alegações\n\n");
    prompt.push_str(
        "Retorne um JSON com overall_score (0-10) e detailed_scores por critério.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ComplexityLevel;

    #[test]
    fn analysis_prompt_embeds_the_content() {
        let prompt = build_analysis_prompt("A expansão do universo é acelerada.");
        assert!(prompt.contains("A expansão do universo é acelerada."));
        assert!(prompt.contains("hook_potential"));
        assert!(prompt.contains("complexity_level"));
    }

    #[test]
    fn script_prompt_uses_analysis_fields() {
        let analysis = ContentAnalysis {
            hook_potential: Some(9.0),
            complexity_level: Some(ComplexityLevel::High),
            key_concepts: vec!["entropia".to_string()],
            ..Default::default()
        };
        let prompt = build_script_prompt(&analysis);
        assert!(prompt.contains("Hook Potential: 9"));
        assert!(prompt.contains("Complexidade: alto"));
        assert!(prompt.contains("entropia"));
    }

    #[test]
    fn script_prompt_defaults_missing_fields() {
        let prompt = build_script_prompt(&ContentAnalysis::default());
        assert!(prompt.contains("Hook Potential: 7"));
        assert!(prompt.contains("Complexidade: médio"));
    }

    #[test]
    fn assessment_prompt_carries_both_documents() {
        let script = Script {
            hook_inicial: "E se tudo fosse diferente?".to_string(),
            ..Default::default()
        };
        let prompt = build_content_assessment_prompt(&script, &ContentAnalysis::default());
        assert!(prompt.contains("E se tudo fosse diferente?"));
        assert!(prompt.contains("RIGOR CIENTÍFICO"));
    }
}
