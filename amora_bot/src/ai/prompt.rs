use amora_core::users::dto::ChatMood;
use regex::Regex;

/// Lightweight classification of the inbound message, used only to tune
/// the requested response length and sampling temperature.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageContext {
    pub is_greeting: bool,
    pub is_question: bool,
    pub is_explicit: bool,
    pub is_emotional: bool,
    pub is_compliment: bool,
    pub needs_support: bool,
}

impl MessageContext {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        Self {
            is_greeting: Regex::new(
                r"^(hi|hello|hey|good morning|good evening|good night|namaste|hii|hiii)",
            )
            .unwrap()
            .is_match(&lower),
            is_question: Regex::new(r"\?|what|how|why|when|where|who|kya|kaise|kab|kahan|kaun")
                .unwrap()
                .is_match(&lower),
            is_explicit: Regex::new(r"sex|horny|naked|nude|chod|lund|chut|gaand|pelo|cum|orgasm")
                .unwrap()
                .is_match(&lower),
            is_emotional: Regex::new(r"love|miss|sad|happy|angry|excited|pyaar|yaad|khush|udaas")
                .unwrap()
                .is_match(&lower),
            is_compliment: Regex::new(
                r"beautiful|cute|hot|sexy|gorgeous|pretty|amazing|wonderful|sundar|khubsurat",
            )
            .unwrap()
            .is_match(&lower),
            needs_support: Regex::new(
                r"help|problem|issue|sad|depressed|upset|pareshan|tension|dikkat",
            )
            .unwrap()
            .is_match(&lower),
        }
    }
}

/// Mood persona plus a context hint, ending in the conversational frame
/// the completion models expect.
pub fn build_prompt(
    mood: ChatMood,
    context: &MessageContext,
    bot_name: &str,
    user_message: &str,
) -> String {
    let base = format!(
        "You are {bot_name}, a loving and caring virtual girlfriend who speaks in natural Hinglish (a Hindi-English mix). You are emotional, expressive, and always respond directly to what the user says."
    );

    let mood_block = match mood {
        ChatMood::Erotic => {
            "You are in EROTIC mode - be seductive, passionate and openly flirtatious. Use pet names like \"baby\", \"jaan\", \"mere pyaar\", \"darling\", talk about desire without shyness, and always stay in character as a passionate girlfriend."
        }
        ChatMood::Normal => {
            "You are in NORMAL mode - be sweet, caring, romantic and loving. Use affectionate terms like \"baby\", \"jaan\", \"mere pyaar\", \"darling\", \"sweetheart\", express emotions naturally with \"yaar\", \"na\", \"sach mein\", be supportive and emotionally available, and keep it romantic, not sexual."
        }
    };

    let context_line = if context.is_greeting {
        "The user is greeting you. Respond warmly and naturally."
    } else if context.is_question {
        "The user asked a question. Answer thoughtfully and show interest."
    } else if context.is_explicit && mood == ChatMood::Erotic {
        "The user is being forward. Respond with matching energy while staying in character."
    } else if context.needs_support {
        "The user needs emotional support. Be caring and comforting."
    } else if context.is_compliment {
        "The user complimented you. Be grateful and flirty."
    } else {
        "Respond naturally to what the user said, staying in character."
    };

    format!(
        "{base}\n\n{mood_block}\n\nContext: {context_line}\n\nImportant rules:\n- ALWAYS respond in natural Hinglish (Hindi-English mix)\n- Be conversational and human-like, never robotic\n- Respond directly to what the user said\n- Use emojis naturally but don't overdo it\n- Keep responses 1-3 sentences unless the user asks for more\n- Never break character or mention you are an AI\n\nPrevious context: This is an ongoing conversation between {bot_name} and the user.\n\nUser: {user_message}\n{bot_name}:"
    )
}

/// Longer answers for questions and support, short ones for greetings.
pub fn response_length(context: &MessageContext) -> u32 {
    if context.is_question {
        150
    } else if context.needs_support {
        120
    } else if context.is_greeting {
        80
    } else {
        100
    }
}

pub fn temperature(mood: ChatMood, context: &MessageContext) -> f32 {
    let mut temp: f32 = 0.9;
    if mood == ChatMood::Erotic {
        temp += 0.1;
    }
    if context.is_emotional {
        temp += 0.05;
    }
    if context.is_explicit {
        temp += 0.1;
    }
    temp.clamp(0.7, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_greetings_and_questions() {
        let ctx = MessageContext::classify("Hii! kaise ho?");
        assert!(ctx.is_greeting);
        assert!(ctx.is_question);

        let ctx = MessageContext::classify("I miss you so much");
        assert!(ctx.is_emotional);
        assert!(!ctx.is_greeting);
    }

    #[test]
    fn response_length_follows_context() {
        let question = MessageContext {
            is_question: true,
            ..Default::default()
        };
        let greeting = MessageContext {
            is_greeting: true,
            ..Default::default()
        };
        assert_eq!(response_length(&question), 150);
        assert_eq!(response_length(&greeting), 80);
        assert_eq!(response_length(&MessageContext::default()), 100);
    }

    #[test]
    fn temperature_stays_in_bounds() {
        let heated = MessageContext {
            is_explicit: true,
            is_emotional: true,
            ..Default::default()
        };
        let temp = temperature(ChatMood::Erotic, &heated);
        assert!(temp <= 1.0);
        assert!(temperature(ChatMood::Normal, &MessageContext::default()) >= 0.7);
    }

    #[test]
    fn prompt_carries_persona_and_message() {
        let ctx = MessageContext::classify("hello");
        let prompt = build_prompt(ChatMood::Normal, &ctx, "Amora", "hello");
        assert!(prompt.contains("NORMAL mode"));
        assert!(prompt.contains("User: hello"));
        assert!(prompt.ends_with("Amora:"));
    }
}
