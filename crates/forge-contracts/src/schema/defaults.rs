use indexmap::IndexMap;

use super::fields::{FieldDefinition, FieldKind, FieldValue, FieldValueSet};
use super::modality::Modality;
use super::registry::{ModalitySchema, ModelDescriptor, RequiredFieldRule, Template};

pub(super) fn builtin_schemas() -> Vec<ModalitySchema> {
    Modality::ALL
        .into_iter()
        .map(|modality| ModalitySchema {
            modality,
            models: models(modality),
            fields: fields(modality),
            required: required(modality),
            templates: match modality {
                Modality::Text => text_templates(),
                Modality::Image => image_templates(),
                Modality::Video => video_templates(),
                Modality::Audio => audio_templates(),
            },
        })
        .collect()
}

fn models(modality: Modality) -> Vec<ModelDescriptor> {
    let rows: &[(&str, &str, &str)] = match modality {
        Modality::Text => &[
            ("gpt-4", "GPT-4 / GPT-4.1 / GPT-4o", "OpenAI's most capable model"),
            ("llama-3", "Meta LLaMA 3", "Open-source powerhouse"),
            ("mistral", "Mistral / Mixtral", "Efficient European AI"),
            ("gemini", "Google Gemini", "Multimodal intelligence"),
            ("claude", "Anthropic Claude", "Advanced reasoning and analysis"),
        ],
        Modality::Image => &[
            ("dalle", "DALL·E", "OpenAI's image generator"),
            ("stable-diffusion", "Stable Diffusion", "Open-source, customizable"),
            ("midjourney", "Midjourney", "High-quality artistic images"),
            ("imagen", "Google Imagen", "Photorealistic generations"),
            ("firefly", "Adobe Firefly", "Commercial-safe content"),
        ],
        Modality::Video => &[
            ("sora", "OpenAI Sora", "Advanced coherent videos"),
            ("runway", "Runway Gen-2 / Gen-3", "Cinematic video generation"),
            ("pika", "Pika Labs Pika", "Easy-to-use video creator"),
            ("veo", "Google Veo", "High-quality video generation"),
            (
                "stable-video-diffusion",
                "Stable Video Diffusion",
                "Open-source video AI",
            ),
        ],
        Modality::Audio => &[
            ("openai-audio", "OpenAI Whisper + TTS", "Speech recognition & synthesis"),
            ("elevenlabs", "ElevenLabs", "Ultra-realistic voices"),
            ("seamless-m4t", "Meta SeamlessM4T", "Multilingual translation & speech"),
            ("indic-tts", "AI4Bharat Indic TTS/STT", "Indian language support"),
            ("coqui-tts", "Coqui TTS", "Open-source TTS"),
        ],
    };
    rows.iter()
        .map(|(id, label, description)| ModelDescriptor {
            id: (*id).to_string(),
            label: (*label).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

fn fields(modality: Modality) -> Vec<FieldDefinition> {
    let mut fields = Vec::new();
    let mut insert = |name: &str, label: &str, placeholder: &str, required: bool, kind: FieldKind| {
        fields.push(FieldDefinition {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            required,
            kind,
        });
    };

    match modality {
        Modality::Text => {
            insert(
                "goal",
                "Goal",
                "e.g., Write a blog post, Generate code, Analyze data",
                true,
                FieldKind::Text,
            );
            insert(
                "subject",
                "Subject",
                "e.g., AI in healthcare, Python web scraper",
                true,
                FieldKind::MultilineText,
            );
            insert(
                "task_type",
                "Task Type",
                "e.g., creative writing, code generation, analysis",
                false,
                FieldKind::Text,
            );
            insert(
                "tone",
                "Tone",
                "e.g., formal, casual, technical, friendly",
                false,
                FieldKind::Text,
            );
            insert(
                "format",
                "Output Format",
                "e.g., markdown, json, plain text, code",
                false,
                FieldKind::Text,
            );
            insert(
                "length",
                "Length",
                "short, medium, long",
                false,
                select(&["short", "medium", "long"]),
            );
            insert(
                "context",
                "Additional Context",
                "Any background information or constraints",
                false,
                FieldKind::MultilineText,
            );
            insert(
                "style",
                "Writing Style",
                "e.g., concise, detailed, conversational",
                false,
                FieldKind::Text,
            );
        }
        Modality::Image => {
            insert(
                "subject",
                "Subject",
                "e.g., a cat sitting on a windowsill",
                true,
                FieldKind::Text,
            );
            insert(
                "style",
                "Style",
                "e.g., photorealistic, oil painting, anime",
                true,
                FieldKind::Text,
            );
            insert(
                "environment",
                "Environment",
                "e.g., modern apartment, forest clearing",
                false,
                FieldKind::Text,
            );
            insert(
                "lighting",
                "Lighting",
                "e.g., golden hour, dramatic shadows",
                false,
                FieldKind::Text,
            );
            insert(
                "camera",
                "Camera",
                "e.g., 50mm close-up, wide angle",
                false,
                FieldKind::Text,
            );
            insert(
                "mood",
                "Mood",
                "e.g., peaceful, energetic, mysterious",
                false,
                FieldKind::Text,
            );
            insert(
                "aspect_ratio",
                "Aspect Ratio",
                "e.g., 16:9, 1:1, 9:16",
                false,
                FieldKind::Text,
            );
        }
        Modality::Video => {
            insert("scene", "Scene", "Describe the scene", true, FieldKind::Text);
            insert("action", "Action", "What's happening?", true, FieldKind::Text);
            insert(
                "duration_seconds",
                "Duration (seconds)",
                "5",
                true,
                FieldKind::Number {
                    min: 1.0,
                    max: 60.0,
                },
            );
            insert(
                "camera_motion",
                "Camera Motion",
                "e.g., slow pan, tracking shot",
                false,
                FieldKind::Text,
            );
            insert(
                "lighting",
                "Lighting",
                "e.g., natural daylight, neon",
                false,
                FieldKind::Text,
            );
            insert(
                "style",
                "Style",
                "e.g., cinematic, documentary",
                false,
                FieldKind::Text,
            );
        }
        Modality::Audio => {
            insert(
                "subject",
                "Text/Script",
                "What should be spoken?",
                true,
                FieldKind::MultilineText,
            );
            insert(
                "accent",
                "Accent/Language",
                "e.g., American, British, Hindi, Tamil",
                true,
                FieldKind::Text,
            );
            insert(
                "emotion",
                "Emotion",
                "e.g., calm, excited, serious",
                true,
                FieldKind::Text,
            );
            insert(
                "pace",
                "Pace",
                "slow, medium, fast",
                true,
                select(&["slow", "medium", "fast"]),
            );
            insert(
                "voice_gender",
                "Voice Gender",
                "male, female, neutral",
                false,
                select(&["male", "female", "neutral"]),
            );
            insert(
                "age_range",
                "Age Range",
                "e.g., young adult, middle-aged, elderly",
                false,
                FieldKind::Text,
            );
            insert(
                "use_case",
                "Use Case",
                "e.g., podcast, audiobook, announcement",
                false,
                FieldKind::Text,
            );
        }
    }

    fields
}

fn required(modality: Modality) -> RequiredFieldRule {
    let common: &[&str] = match modality {
        Modality::Text => &["goal", "subject"],
        Modality::Image => &["subject", "style"],
        Modality::Video => &["scene", "action", "duration_seconds"],
        Modality::Audio => &["subject", "accent", "emotion", "pace"],
    };

    // One entry per model, most of them empty.
    let mut models = IndexMap::new();
    for model in self::models(modality) {
        let extra: Vec<String> = extra_required(modality, &model.id)
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        models.insert(model.id, extra);
    }

    RequiredFieldRule {
        common: common.iter().map(|name| (*name).to_string()).collect(),
        models,
    }
}

fn extra_required(modality: Modality, model: &str) -> &'static [&'static str] {
    match (modality, model) {
        (Modality::Video, "runway") => &["camera_motion"],
        _ => &[],
    }
}

fn select(options: &[&str]) -> FieldKind {
    FieldKind::Select {
        options: options.iter().map(|option| (*option).to_string()).collect(),
    }
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn template(key: &str, name: &str, values: &[(&str, FieldValue)]) -> Template {
    Template {
        key: key.to_string(),
        name: name.to_string(),
        values: values
            .iter()
            .map(|(field, value)| ((*field).to_string(), value.clone()))
            .collect::<FieldValueSet>(),
    }
}

fn text_templates() -> IndexMap<String, Template> {
    let mut templates = IndexMap::new();
    let mut insert = |key: &str, name: &str, values: &[(&str, FieldValue)]| {
        templates.insert(key.to_string(), template(key, name, values));
    };

    insert(
        "blog",
        "Blog Post",
        &[
            ("goal", text("Write a blog post")),
            ("subject", text("The impact of AI on modern healthcare")),
            ("task_type", text("creative writing")),
            ("tone", text("professional")),
            ("format", text("markdown")),
            ("length", text("medium")),
        ],
    );
    insert(
        "code",
        "Code Generation",
        &[
            ("goal", text("Generate a function")),
            ("subject", text("Sort an array of objects by date in Python")),
            ("task_type", text("code generation")),
            ("tone", text("technical")),
            ("format", text("python")),
            ("length", text("short")),
        ],
    );
    insert(
        "analysis",
        "Data Analysis",
        &[
            ("goal", text("Analyze and summarize")),
            ("subject", text("Market trends in renewable energy sector")),
            ("task_type", text("analysis")),
            ("tone", text("formal")),
            ("format", text("markdown")),
            ("length", text("long")),
        ],
    );
    insert(
        "email",
        "Professional Email",
        &[
            ("goal", text("Write a professional email")),
            ("subject", text("Request for project timeline extension")),
            ("task_type", text("business writing")),
            ("tone", text("formal")),
            ("format", text("plain text")),
            ("length", text("short")),
        ],
    );
    insert(
        "socialMedia",
        "Social Media Post",
        &[
            ("goal", text("Create a social media post")),
            ("subject", text("Launch of our new eco-friendly product line")),
            ("task_type", text("marketing")),
            ("tone", text("casual")),
            ("format", text("plain text")),
            ("length", text("short")),
        ],
    );
    insert(
        "story",
        "Creative Story",
        &[
            ("goal", text("Write a short story")),
            ("subject", text("A time traveler discovers an ancient civilization")),
            ("task_type", text("creative writing")),
            ("tone", text("engaging")),
            ("format", text("markdown")),
            ("length", text("long")),
        ],
    );
    insert(
        "tutorial",
        "Tutorial/Guide",
        &[
            ("goal", text("Create a tutorial")),
            ("subject", text("How to build a REST API with Node.js")),
            ("task_type", text("technical writing")),
            ("tone", text("friendly")),
            ("format", text("markdown")),
            ("length", text("medium")),
        ],
    );
    insert(
        "summary",
        "Text Summary",
        &[
            ("goal", text("Summarize the following")),
            ("subject", text("Key points from a 50-page research paper on climate change")),
            ("task_type", text("summarization")),
            ("tone", text("neutral")),
            ("format", text("bullet points")),
            ("length", text("short")),
        ],
    );
    insert(
        "translation",
        "Translation Task",
        &[
            ("goal", text("Translate text")),
            ("subject", text("Business proposal from English to Spanish")),
            ("task_type", text("translation")),
            ("tone", text("formal")),
            ("format", text("plain text")),
            ("length", text("medium")),
        ],
    );
    insert(
        "poem",
        "Poetry",
        &[
            ("goal", text("Write a poem")),
            ("subject", text("The beauty of autumn leaves falling")),
            ("task_type", text("creative writing")),
            ("tone", text("emotional")),
            ("format", text("verse")),
            ("length", text("short")),
        ],
    );

    templates
}

fn image_templates() -> IndexMap<String, Template> {
    let mut templates = IndexMap::new();
    let mut insert = |key: &str, name: &str, values: &[(&str, FieldValue)]| {
        templates.insert(key.to_string(), template(key, name, values));
    };

    insert(
        "portrait",
        "Portrait Photography",
        &[
            ("subject", text("a person")),
            ("style", text("professional portrait photography")),
            ("lighting", text("soft natural light")),
            ("camera", text("85mm f/1.8")),
            ("mood", text("confident and approachable")),
        ],
    );
    insert(
        "landscape",
        "Landscape",
        &[
            ("subject", text("a mountain landscape")),
            ("style", text("landscape photography")),
            ("environment", text("alpine setting at sunrise")),
            ("lighting", text("golden hour")),
            ("camera", text("wide angle 24mm")),
        ],
    );
    insert(
        "fantasy",
        "Fantasy Art",
        &[
            ("subject", text("a magical creature")),
            ("style", text("fantasy digital art")),
            ("environment", text("enchanted forest")),
            ("lighting", text("mystical glowing lights")),
            ("mood", text("ethereal and mysterious")),
        ],
    );
    insert(
        "product",
        "Product Photography",
        &[
            ("subject", text("a luxury watch on marble surface")),
            ("style", text("commercial product photography")),
            ("lighting", text("studio lighting with soft shadows")),
            ("camera", text("macro 100mm")),
            ("mood", text("elegant and premium")),
            ("environment", text("minimalist white background")),
        ],
    );
    insert(
        "cyberpunk",
        "Cyberpunk Scene",
        &[
            ("subject", text("futuristic cityscape at night")),
            ("style", text("cyberpunk digital art")),
            ("lighting", text("neon lights and holographic displays")),
            ("environment", text("dense urban dystopian city")),
            ("mood", text("dark and atmospheric")),
        ],
    );
    insert(
        "anime",
        "Anime Character",
        &[
            ("subject", text("anime girl with flowing hair")),
            ("style", text("anime illustration")),
            ("lighting", text("dramatic backlight")),
            ("environment", text("cherry blossom garden")),
            ("mood", text("peaceful and serene")),
        ],
    );
    insert(
        "architecture",
        "Architecture",
        &[
            ("subject", text("modern glass skyscraper")),
            ("style", text("architectural photography")),
            ("lighting", text("blue hour twilight")),
            ("camera", text("tilt-shift lens")),
            ("environment", text("urban downtown area")),
            ("mood", text("impressive and grand")),
        ],
    );
    insert(
        "food",
        "Food Photography",
        &[
            ("subject", text("gourmet pasta dish")),
            ("style", text("food photography")),
            ("lighting", text("natural window light")),
            ("camera", text("50mm f/1.4")),
            ("environment", text("rustic wooden table")),
            ("mood", text("appetizing and fresh")),
        ],
    );
    insert(
        "scifi",
        "Sci-Fi Concept",
        &[
            ("subject", text("advanced spacecraft in orbit")),
            ("style", text("science fiction concept art")),
            ("lighting", text("dramatic star lighting")),
            ("environment", text("deep space with nebula")),
            ("mood", text("awe-inspiring and futuristic")),
        ],
    );
    insert(
        "abstract",
        "Abstract Art",
        &[
            ("subject", text("flowing colorful shapes")),
            ("style", text("abstract digital art")),
            ("lighting", text("gradient color transitions")),
            ("mood", text("dynamic and energetic")),
        ],
    );

    templates
}

fn video_templates() -> IndexMap<String, Template> {
    let mut templates = IndexMap::new();
    let mut insert = |key: &str, name: &str, values: &[(&str, FieldValue)]| {
        templates.insert(key.to_string(), template(key, name, values));
    };

    insert(
        "cinematic",
        "Cinematic Scene",
        &[
            ("scene", text("a dramatic urban environment")),
            ("action", text("person walking in slow motion")),
            ("duration_seconds", FieldValue::Number(10.0)),
            ("camera_motion", text("slow dolly forward")),
            ("lighting", text("moody with strong shadows")),
            ("style", text("cinematic film look")),
        ],
    );
    insert(
        "nature",
        "Nature Documentary",
        &[
            ("scene", text("wildlife in natural habitat")),
            ("action", text("animal interacting with environment")),
            ("duration_seconds", FieldValue::Number(15.0)),
            ("camera_motion", text("smooth tracking shot")),
            ("lighting", text("natural daylight")),
            ("style", text("documentary realism")),
        ],
    );
    insert(
        "product",
        "Product Demo",
        &[
            ("scene", text("modern minimalist studio")),
            ("action", text("product rotating with feature highlights")),
            ("duration_seconds", FieldValue::Number(8.0)),
            ("camera_motion", text("360 degree rotation")),
            ("lighting", text("clean studio lighting")),
            ("style", text("commercial product video")),
        ],
    );
    insert(
        "action",
        "Action Sequence",
        &[
            ("scene", text("intense chase through city streets")),
            ("action", text("fast-paced pursuit with dynamic movements")),
            ("duration_seconds", FieldValue::Number(12.0)),
            ("camera_motion", text("handheld tracking with quick cuts")),
            ("lighting", text("high contrast dramatic lighting")),
            ("style", text("action movie aesthetic")),
        ],
    );
    insert(
        "timelapse",
        "Time-lapse",
        &[
            ("scene", text("city skyline transitioning from day to night")),
            ("action", text("clouds moving, lights turning on")),
            ("duration_seconds", FieldValue::Number(20.0)),
            ("camera_motion", text("locked off static shot")),
            ("lighting", text("changing from daylight to twilight")),
            ("style", text("time-lapse photography")),
        ],
    );
    insert(
        "drone",
        "Drone Footage",
        &[
            ("scene", text("coastal landscape with ocean waves")),
            ("action", text("waves crashing on rocky shore")),
            ("duration_seconds", FieldValue::Number(15.0)),
            ("camera_motion", text("smooth aerial flyover")),
            ("lighting", text("golden hour sunset")),
            ("style", text("aerial cinematography")),
        ],
    );
    insert(
        "tutorial",
        "Tutorial/How-to",
        &[
            ("scene", text("well-lit workspace with tools")),
            ("action", text("hands demonstrating step-by-step process")),
            ("duration_seconds", FieldValue::Number(10.0)),
            ("camera_motion", text("overhead static shot")),
            ("lighting", text("bright even lighting")),
            ("style", text("educational tutorial")),
        ],
    );
    insert(
        "vlog",
        "Vlog Style",
        &[
            ("scene", text("outdoor location or home setting")),
            ("action", text("person talking to camera")),
            ("duration_seconds", FieldValue::Number(8.0)),
            ("camera_motion", text("handheld casual movement")),
            ("lighting", text("natural available light")),
            ("style", text("casual vlog aesthetic")),
        ],
    );
    insert(
        "animation",
        "Animation",
        &[
            ("scene", text("colorful abstract environment")),
            ("action", text("animated shapes and transitions")),
            ("duration_seconds", FieldValue::Number(10.0)),
            ("camera_motion", text("smooth programmed movements")),
            ("lighting", text("vibrant stylized lighting")),
            ("style", text("motion graphics animation")),
        ],
    );

    templates
}

fn audio_templates() -> IndexMap<String, Template> {
    let mut templates = IndexMap::new();
    let mut insert = |key: &str, name: &str, values: &[(&str, FieldValue)]| {
        templates.insert(key.to_string(), template(key, name, values));
    };

    insert(
        "podcast",
        "Podcast Host",
        &[
            ("subject", text("Welcome to today's episode")),
            ("accent", text("American")),
            ("emotion", text("friendly and conversational")),
            ("pace", text("medium")),
            ("voice_gender", text("neutral")),
            ("use_case", text("podcast")),
        ],
    );
    insert(
        "audiobook",
        "Audiobook Narrator",
        &[
            ("subject", text("Chapter one begins")),
            ("accent", text("British")),
            ("emotion", text("calm and engaging")),
            ("pace", text("slow")),
            ("voice_gender", text("male")),
            ("use_case", text("audiobook")),
        ],
    );
    insert(
        "multilingual",
        "Multilingual Speech",
        &[
            ("subject", text("नमस्ते, आज हम बात करेंगे")),
            ("accent", text("Hindi")),
            ("emotion", text("friendly")),
            ("pace", text("medium")),
            ("voice_gender", text("female")),
            ("use_case", text("announcement")),
        ],
    );
    insert(
        "commercial",
        "Commercial/Ad",
        &[
            ("subject", text("Introducing the revolutionary new product")),
            ("accent", text("American")),
            ("emotion", text("energetic and persuasive")),
            ("pace", text("medium")),
            ("voice_gender", text("male")),
            ("use_case", text("advertisement")),
        ],
    );
    insert(
        "meditation",
        "Meditation Guide",
        &[
            ("subject", text("Take a deep breath and relax your shoulders")),
            ("accent", text("American")),
            ("emotion", text("calm and soothing")),
            ("pace", text("slow")),
            ("voice_gender", text("female")),
            ("use_case", text("meditation")),
        ],
    );
    insert(
        "gaming",
        "Gaming Character",
        &[
            ("subject", text("The battle begins now, warrior!")),
            ("accent", text("British")),
            ("emotion", text("intense and dramatic")),
            ("pace", text("fast")),
            ("voice_gender", text("male")),
            ("use_case", text("gaming")),
        ],
    );
    insert(
        "news",
        "News Anchor",
        &[
            ("subject", text("Breaking news from around the world")),
            ("accent", text("American")),
            ("emotion", text("professional and authoritative")),
            ("pace", text("medium")),
            ("voice_gender", text("neutral")),
            ("use_case", text("news broadcast")),
        ],
    );
    insert(
        "tutorial",
        "Tutorial Instructor",
        &[
            ("subject", text("In this tutorial, we'll learn step by step")),
            ("accent", text("American")),
            ("emotion", text("helpful and clear")),
            ("pace", text("slow")),
            ("voice_gender", text("female")),
            ("use_case", text("tutorial")),
        ],
    );
    insert(
        "documentary",
        "Documentary Narrator",
        &[
            ("subject", text("Deep in the Amazon rainforest, life thrives")),
            ("accent", text("British")),
            ("emotion", text("informative and captivating")),
            ("pace", text("medium")),
            ("voice_gender", text("male")),
            ("use_case", text("documentary")),
        ],
    );
    insert(
        "children",
        "Children's Story",
        &[
            ("subject", text("Once upon a time in a magical land")),
            ("accent", text("American")),
            ("emotion", text("cheerful and playful")),
            ("pace", text("medium")),
            ("voice_gender", text("female")),
            ("use_case", text("children's content")),
        ],
    );
    insert(
        "assistant",
        "AI Assistant",
        &[
            ("subject", text("How can I help you today?")),
            ("accent", text("American")),
            ("emotion", text("friendly and helpful")),
            ("pace", text("medium")),
            ("voice_gender", text("neutral")),
            ("use_case", text("virtual assistant")),
        ],
    );

    templates
}
