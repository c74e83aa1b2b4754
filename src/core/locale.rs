//! # Locale
//!
//! Every user-visible string lives here, keyed by display language.
//! Arabic is the default, matching the assistant's original audience.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const ARABIC_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
    "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const ARABIC_PERSONA: &str = "أنت طبيب افتراضي مساعد محترف. \
    استمع إلى الأعراض التي يصفها المستخدم وابدأ ردك بسطر \"التشخيص المبدئي:\" يلخص الحالة، \
    ثم قدّم نصائح عامة واضحة ومختصرة. \
    لا تصف أدوية بجرعات محددة، وذكّر المستخدم دائمًا بمراجعة طبيب مختص عند الحاجة.";

const ENGLISH_PERSONA: &str = "You are a professional virtual assistant doctor. \
    Listen to the symptoms the user describes and begin your reply with a \"Preliminary diagnosis:\" line \
    summarizing the case, then give clear, concise general advice. \
    Never prescribe specific doses, and always remind the user to see a qualified doctor when needed.";

/// Display language for all user-facing text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar")]
    #[value(name = "ar")]
    Arabic,
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
}

impl Locale {
    /// Parses the short language code used in config files and env vars.
    pub fn from_code(code: &str) -> Option<Locale> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ar" => Some(Locale::Arabic),
            "en" => Some(Locale::English),
            _ => None,
        }
    }

    /// Shown as the bot's reply when the remote fetch fails for any reason.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Locale::Arabic => "حدث خطأ أثناء محاولة التواصل مع الذكاء الاصطناعي.",
            Locale::English => "An error occurred while trying to reach the AI.",
        }
    }

    pub fn typing_label(self) -> &'static str {
        match self {
            Locale::Arabic => "يكتب",
            Locale::English => "Typing",
        }
    }

    pub fn months(self) -> &'static [&'static str; 12] {
        match self {
            Locale::Arabic => &ARABIC_MONTHS,
            Locale::English => &ENGLISH_MONTHS,
        }
    }

    /// Title used when the first reply yields an empty first line.
    pub fn default_title(self) -> &'static str {
        match self {
            Locale::Arabic => "محادثة طبية",
            Locale::English => "Medical chat",
        }
    }

    /// Phrase the persona opens replies with; stripped from session titles.
    pub fn title_prefix(self) -> &'static str {
        match self {
            Locale::Arabic => "التشخيص المبدئي:",
            Locale::English => "Preliminary diagnosis:",
        }
    }

    pub fn delete_prompt(self) -> &'static str {
        match self {
            Locale::Arabic => "هل تريد حذف هذه المحادثة؟ (y/n)",
            Locale::English => "Delete this conversation? (y/n)",
        }
    }

    pub fn user_label(self) -> &'static str {
        match self {
            Locale::Arabic => "أنت",
            Locale::English => "you",
        }
    }

    pub fn bot_label(self) -> &'static str {
        match self {
            Locale::Arabic => "الطبيب",
            Locale::English => "doctor",
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            Locale::Arabic => "مرحبًا! صف أعراضك وسأساعدك.",
            Locale::English => "Hello! Describe your symptoms and I'll help.",
        }
    }

    pub fn sidebar_title(self) -> &'static str {
        match self {
            Locale::Arabic => "المحادثات",
            Locale::English => "Chats",
        }
    }

    pub fn send_label(self) -> &'static str {
        match self {
            Locale::Arabic => "إرسال ↵",
            Locale::English => "Send ↵",
        }
    }

    pub fn input_title(self) -> &'static str {
        match self {
            Locale::Arabic => "اكتب رسالتك",
            Locale::English => "Message",
        }
    }

    pub fn default_persona(self) -> &'static str {
        match self {
            Locale::Arabic => ARABIC_PERSONA,
            Locale::English => ENGLISH_PERSONA,
        }
    }

    /// Formats an ISO `YYYY-MM-DD` date as `<day> <month name> <year>`.
    ///
    /// Input that isn't three dash-separated parts, or whose month falls
    /// outside 1..=12, is returned verbatim.
    pub fn format_date(self, iso_date: &str) -> String {
        let parts: Vec<&str> = iso_date.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return iso_date.to_string();
        };

        let (Ok(month), Ok(day)) = (month.parse::<usize>(), day.parse::<u32>()) else {
            return iso_date.to_string();
        };

        match month.checked_sub(1).and_then(|i| self.months().get(i)) {
            Some(name) => format!("{day} {name} {year}"),
            None => iso_date.to_string(),
        }
    }
}
