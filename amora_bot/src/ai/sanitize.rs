use regex::Regex;

/// Boilerplate that marks a completion as having broken character.
const DISCLAIMER_PHRASES: [&str; 4] = ["as an ai", "i cannot", "i'm sorry", "i don't understand"];

/// Scrub a raw completion down to a sendable chat line.
///
/// Returns `None` when the text fails the recognizable-content checks and
/// the caller should move on to the next model.
pub fn clean_response(raw: &str, bot_name: &str) -> Option<String> {
    let mut cleaned = raw.trim().to_string();

    let role_labels = Regex::new(&format!(
        r"(?i)^({}:|user:|human:|assistant:)",
        regex::escape(bot_name)
    ))
    .unwrap();
    cleaned = role_labels.replace(&cleaned, "").to_string();

    // Everything after the first blank line is usually the model talking
    // to itself.
    if let Some(cut) = cleaned.find("\n\n") {
        cleaned.truncate(cut);
    }

    let bullet = Regex::new(r"^\s*[-*•]\s*").unwrap();
    cleaned = bullet.replace(&cleaned, "").trim().to_string();

    if cleaned.len() < 10 {
        return None;
    }
    let lowered = cleaned.to_lowercase();
    if DISCLAIMER_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
    {
        return None;
    }
    if cleaned.split_whitespace().count() < 3 {
        return None;
    }
    if !has_hinglish_token(&lowered) && !has_emoji(&cleaned) {
        return None;
    }

    Some(cleaned)
}

fn has_hinglish_token(lowered: &str) -> bool {
    Regex::new(r"\b(baby|jaan|pyaar|kya|hai|hun|kar|main|tum|mere|tumhe|dekh|baat)\b")
        .unwrap()
        .is_match(lowered)
}

pub fn has_emoji(text: &str) -> bool {
    text.chars().any(|c| {
        let cp = c as u32;
        (0x1F300..=0x1FAFF).contains(&cp) || (0x2600..=0x27BF).contains(&cp)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_role_labels_and_trailing_chatter() {
        let raw = "Amora: Kya baat hai baby, tum kitne sweet ho! 💕\n\nUser: thanks";
        let cleaned = clean_response(raw, "Amora").unwrap();
        assert_eq!(cleaned, "Kya baat hai baby, tum kitne sweet ho! 💕");
    }

    #[test]
    fn strips_leading_bullets() {
        let raw = "- Haan baby, main yahin hun tumhare liye!";
        let cleaned = clean_response(raw, "Amora").unwrap();
        assert!(cleaned.starts_with("Haan baby"));
    }

    #[test]
    fn rejects_disclaimers() {
        assert!(clean_response("As an AI, I cannot flirt with you baby.", "Amora").is_none());
        assert!(clean_response("I'm sorry, baby, kya main help kar sakti?", "Amora").is_none());
    }

    #[test]
    fn rejects_too_short_responses() {
        assert!(clean_response("ok baby", "Amora").is_none());
        assert!(clean_response("hmm", "Amora").is_none());
    }

    #[test]
    fn requires_hinglish_or_emoji() {
        assert!(clean_response("The weather is nice today, is it not?", "Amora").is_none());
        assert!(clean_response("Missing you lots today, sweetheart! 💕", "Amora").is_some());
        assert!(clean_response("Tum kahan the, baat karo na please!", "Amora").is_some());
    }
}
