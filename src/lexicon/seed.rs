//! English seed data for [`BasicLexicon::english`].
//!
//! Plain word lists; words appearing in several lists simply accumulate senses
//! ("march" is a month and a verb, "jack" a first name and a noun).

use super::BasicLexicon;
use crate::{Category, Features};

static MONTHS: &[(&str, f64)] = &[
    ("january", 1.0),
    ("february", 2.0),
    ("march", 3.0),
    ("april", 4.0),
    ("may", 5.0),
    ("june", 6.0),
    ("july", 7.0),
    ("august", 8.0),
    ("september", 9.0),
    ("october", 10.0),
    ("november", 11.0),
    ("december", 12.0),
];

static MONTH_ABBREVIATIONS: &[(&str, f64)] = &[
    ("jan", 1.0),
    ("feb", 2.0),
    ("mar", 3.0),
    ("apr", 4.0),
    ("jun", 6.0),
    ("jul", 7.0),
    ("aug", 8.0),
    ("sep", 9.0),
    ("sept", 9.0),
    ("oct", 10.0),
    ("nov", 11.0),
    ("dec", 12.0),
];

static WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "mon", "tue", "tues", "wed",
    "thu", "thur", "thurs", "fri", "sat", "sun",
];

static TITLES: &[(&str, bool)] = &[
    ("mr", true),
    ("mrs", true),
    ("ms", true),
    ("dr", true),
    ("prof", true),
    ("gen", true),
    ("sen", true),
    ("rep", true),
    ("gov", true),
    ("rev", true),
    ("capt", true),
    ("lt", true),
    ("col", true),
    ("sgt", true),
    ("miss", false),
    ("doctor", false),
    ("professor", false),
    ("president", false),
    ("senator", false),
    ("governor", false),
    ("judge", false),
    ("general", false),
    ("captain", false),
    ("sir", false),
    ("dame", false),
    ("lady", false),
    ("lord", false),
    ("mayor", false),
];

static FIRST_NAMES: &[&str] = &[
    "john", "james", "robert", "michael", "william", "david", "richard", "joseph", "thomas", "charles", "daniel",
    "matthew", "anthony", "mark", "paul", "steven", "andrew", "kenneth", "george", "edward", "brian", "ronald",
    "kevin", "jason", "jeffrey", "gary", "timothy", "frank", "eric", "stephen", "larry", "scott", "peter",
    "henry", "walter", "arthur", "harold", "albert", "jack", "will", "bill", "bob", "tom", "jim", "joe", "sam",
    "max", "mary", "patricia", "jennifer", "linda", "elizabeth", "barbara", "susan", "jessica", "sarah", "karen",
    "nancy", "lisa", "margaret", "betty", "sandra", "ashley", "dorothy", "kimberly", "emily", "donna", "michelle",
    "carol", "amanda", "melissa", "deborah", "stephanie", "rebecca", "laura", "helen", "sharon", "cynthia",
    "kathleen", "amy", "anna", "ruth", "alice", "grace", "rose", "jane", "ann", "florence", "paris", "austin",
    "virginia", "georgia", "chris", "alex", "pat", "dana",
];

static NAME_PARTICLES: &[&str] = &["van", "von", "de", "der", "da", "di", "del", "la", "le", "du", "st"];

static NAME_SUFFIXES: &[(&str, bool)] = &[
    ("jr", true),
    ("sr", true),
    ("ii", false),
    ("iii", false),
    ("iv", false),
    ("phd", true),
    ("md", true),
    ("esq", true),
];

static COMMON_SURNAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "miller", "davis", "garcia", "rodriguez", "wilson",
    "martinez", "anderson", "taylor", "thomas", "hernandez", "moore", "martin", "jackson", "thompson", "white",
    "lopez", "lee", "gonzalez", "harris", "clark", "lewis", "robinson", "walker", "young", "allen", "king",
    "wright", "hill", "baker", "nelson", "carter", "mitchell", "roberts", "turner", "phillips", "campbell",
    "parker", "evans", "edwards", "collins", "stewart", "morris", "murphy", "cook", "rogers",
];

static CITIES: &[&str] = &[
    "boston", "chicago", "houston", "phoenix", "philadelphia", "dallas", "austin", "seattle", "denver",
    "portland", "atlanta", "miami", "detroit", "baltimore", "cambridge", "springfield", "paris", "london",
    "berlin", "madrid", "rome", "tokyo", "beijing", "moscow", "sydney", "toronto", "montreal", "dublin",
    "florence", "vienna", "prague", "lisbon", "amsterdam", "washington",
];

static STATES: &[&str] = &[
    "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut", "delaware", "florida",
    "georgia", "hawaii", "idaho", "illinois", "indiana", "iowa", "kansas", "kentucky", "louisiana", "maine",
    "maryland", "massachusetts", "michigan", "minnesota", "mississippi", "missouri", "montana", "nebraska",
    "nevada", "ohio", "oklahoma", "oregon", "pennsylvania", "tennessee", "texas", "utah", "vermont", "virginia",
    "washington", "wisconsin", "wyoming", "ontario", "quebec", "bavaria",
];

static STATE_ABBREVIATIONS: &[&str] =
    &["ca", "ny", "tx", "fl", "il", "nj", "wa", "ma", "pa", "ga", "nc", "va", "az", "co", "mi", "mn", "md"];

static COUNTRIES: &[&str] = &[
    "france", "germany", "spain", "italy", "japan", "china", "russia", "canada", "mexico", "brazil", "india",
    "australia", "ireland", "england", "scotland", "wales", "austria", "portugal", "netherlands", "belgium",
    "switzerland", "sweden", "norway", "denmark", "finland", "poland", "greece", "egypt", "kenya", "argentina",
    "usa", "uk",
];

static PLACES: &[&str] = &["yellowstone", "everest", "sahara", "amazon", "alps", "manhattan", "brooklyn"];

static COMPOUNDS: &[(&str, Category)] = &[
    ("new york", cats!(CITY | STATE)),
    ("new york city", cats!(CITY)),
    ("los angeles", cats!(CITY)),
    ("san francisco", cats!(CITY)),
    ("san diego", cats!(CITY)),
    ("las vegas", cats!(CITY)),
    ("salt lake city", cats!(CITY)),
    ("hong kong", cats!(CITY)),
    ("buenos aires", cats!(CITY)),
    ("new jersey", cats!(STATE)),
    ("new mexico", cats!(STATE)),
    ("new hampshire", cats!(STATE)),
    ("north carolina", cats!(STATE)),
    ("south carolina", cats!(STATE)),
    ("north dakota", cats!(STATE)),
    ("south dakota", cats!(STATE)),
    ("west virginia", cats!(STATE)),
    ("rhode island", cats!(STATE)),
    ("united states", cats!(COUNTRY)),
    ("united kingdom", cats!(COUNTRY)),
    ("new zealand", cats!(COUNTRY)),
    ("south africa", cats!(COUNTRY)),
    ("cape cod", cats!(PLACE)),
    ("mount everest", cats!(PLACE)),
    ("lake tahoe", cats!(PLACE)),
    ("grand canyon", cats!(PLACE)),
    ("ice cream", cats!(NOUN)),
    ("high school", cats!(NOUN)),
    ("real estate", cats!(NOUN)),
    ("post office", cats!(NOUN)),
];

static TIMEZONES: &[&str] = &[
    "est", "edt", "cst", "cdt", "mst", "mdt", "pst", "pdt", "gmt", "utc", "bst", "cet", "cest", "jst", "ist",
];

static DAYTIMES: &[&str] = &["am", "pm", "noon", "midnight"];

static CARDINALS: &[(&str, f64)] = &[
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
    ("twenty", 20.0),
    ("thirty", 30.0),
    ("forty", 40.0),
    ("fifty", 50.0),
    ("sixty", 60.0),
    ("seventy", 70.0),
    ("eighty", 80.0),
    ("ninety", 90.0),
    ("dozen", 12.0),
];

static MULTIPLIERS: &[(&str, f64)] =
    &[("hundred", 100.0), ("thousand", 1e3), ("million", 1e6), ("billion", 1e9), ("trillion", 1e12)];

static ORDINALS: &[(&str, f64)] = &[
    ("first", 1.0),
    ("second", 2.0),
    ("third", 3.0),
    ("fourth", 4.0),
    ("fifth", 5.0),
    ("sixth", 6.0),
    ("seventh", 7.0),
    ("eighth", 8.0),
    ("ninth", 9.0),
    ("tenth", 10.0),
    ("eleventh", 11.0),
    ("twelfth", 12.0),
    ("thirteenth", 13.0),
    ("fourteenth", 14.0),
    ("fifteenth", 15.0),
    ("sixteenth", 16.0),
    ("seventeenth", 17.0),
    ("eighteenth", 18.0),
    ("nineteenth", 19.0),
    ("twentieth", 20.0),
    ("thirtieth", 30.0),
    ("hundredth", 100.0),
];

static DETERMINERS: &[(&str, Features)] = &[
    ("the", feats!()),
    ("a", feats!(WANTS_SINGULAR)),
    ("an", feats!(WANTS_SINGULAR)),
    ("this", feats!(WANTS_SINGULAR)),
    ("that", feats!(WANTS_SINGULAR)),
    ("each", feats!(WANTS_SINGULAR)),
    ("every", feats!(WANTS_SINGULAR)),
    ("another", feats!(WANTS_SINGULAR)),
    ("these", feats!(WANTS_PLURAL)),
    ("those", feats!(WANTS_PLURAL)),
    ("several", feats!(WANTS_PLURAL)),
    ("many", feats!(WANTS_PLURAL)),
    ("both", feats!(WANTS_PLURAL)),
    ("few", feats!(WANTS_PLURAL)),
    ("some", feats!()),
    ("any", feats!()),
    ("no", feats!()),
    ("all", feats!()),
    ("my", feats!()),
    ("your", feats!()),
    ("his", feats!()),
    ("her", feats!()),
    ("its", feats!()),
    ("our", feats!()),
    ("their", feats!()),
];

static PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "about", "over", "under", "near",
    "after", "before", "during", "since", "until", "between", "among", "through", "across", "behind", "beyond",
    "without", "within", "against", "toward", "towards", "upon",
];

static PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "who", "what", "which", "someone",
    "something", "anyone", "everyone", "nothing",
];

static CONJUNCTIONS: &[&str] = &["and", "or", "nor", "yet", "so"];

static BREAK_WORDS: &[&str] =
    &["but", "because", "however", "although", "though", "whereas", "therefore", "unless", "while", "if", "when"];

static ADVERBS: &[&str] = &[
    "very", "quite", "rather", "extremely", "really", "too", "so", "quickly", "slowly", "carefully", "easily",
    "often", "never", "always", "sometimes", "soon", "now", "then", "here", "there", "almost", "nearly", "just",
    "only", "also", "still", "highly", "fairly", "mostly", "well", "badly", "happily", "loudly", "quietly",
];

static ADJECTIVES: &[&str] = &[
    "new", "old", "big", "small", "large", "little", "long", "short", "high", "low", "good", "bad", "great",
    "young", "early", "late", "important", "public", "private", "national", "local", "red", "blue", "green",
    "black", "white", "brown", "happy", "sad", "quick", "slow", "lazy", "bright", "dark", "rare", "ancient",
    "modern", "federal", "famous", "free", "full", "empty", "hot", "cold", "warm", "rich", "poor", "strong",
    "weak", "main", "final", "fast", "open", "simple", "difficult", "easy", "beautiful", "tall", "heavy",
];

static NOUNS: &[&str] = &[
    "book", "library", "congress", "dog", "cat", "house", "car", "city", "country", "state", "chapter", "page",
    "word", "phrase", "sentence", "text", "document", "index", "search", "engine", "time", "day", "week", "year",
    "month", "morning", "evening", "night", "people", "person", "man", "woman", "child", "children", "student",
    "teacher", "school", "university", "company", "government", "president", "meeting", "report", "system",
    "program", "computer", "network", "data", "information", "world", "water", "food", "money", "market",
    "price", "river", "mountain", "lake", "street", "road", "building", "office", "room", "door", "window",
    "table", "chair", "paper", "letter", "science", "history", "music", "art", "game", "team", "player",
    "doctor", "court", "law", "judge", "case", "question", "answer", "problem", "idea", "park", "garden", "tree",
    "flower", "bird", "fox", "horse", "ship", "train", "plane", "jack", "will", "bill", "rose", "mark", "grant",
    "smith", "baker", "cook", "hunter", "run", "walk", "watch", "play", "work", "report", "march", "diamond",
    "heart", "club", "spade", "story", "friend", "family", "group", "member", "price", "cost", "share", "stock",
];

static UNITS: &[&str] = &[
    "mile", "foot", "feet", "inch", "meter", "kilometer", "pound", "ounce", "gallon", "liter", "dollar", "cent",
    "euro", "percent", "hour", "minute", "second", "kilogram", "gram", "degree", "acre", "ton",
];

static VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "has", "have", "had", "do", "does", "did", "will", "would",
    "can", "could", "shall", "should", "may", "might", "must", "march", "run", "walk", "watch", "play", "work",
    "book", "park", "mark", "grant", "cook", "report", "chase", "see", "saw", "seen", "read", "write", "wrote",
    "written", "find", "found", "make", "made", "take", "took", "give", "gave", "meet", "met", "visit", "open",
    "close", "build", "built", "buy", "bought", "sell", "sold", "own", "like", "love", "want", "need", "index",
    "search", "jump", "eat", "ate", "leave", "left", "arrive", "go", "went", "come", "came", "speak", "spoke",
    "know", "knew", "study", "start", "stop", "sign", "call", "win", "won", "lose", "lost",
];

static PATTERNS: &[(&str, &str)] = &[
    ("mcdonald", "AaAaaaaa"),
    ("macdonald", "AaaAaaaaa"),
    ("iphone", "aAaaaa"),
    ("nasa", "AAAA"),
    ("usa", "AAA"),
    ("phd", "AaA"),
];

/// Populate `lex` with the English seed lists.
pub(super) fn install(lex: &mut BasicLexicon) {
    let function = Features::FUNCTION_WORD;

    for (word, n) in MONTHS {
        lex.insert(word, Category::MONTH, Features::empty(), Some(*n));
    }
    for (word, n) in MONTH_ABBREVIATIONS {
        lex.insert(word, Category::MONTH, Features::ABBREVIATION, Some(*n));
    }
    for word in WEEKDAYS {
        let abbrev = if word.len() <= 5 && !word.ends_with("day") { Features::ABBREVIATION } else { Features::empty() };
        lex.insert(word, Category::WEEKDAY, abbrev, None);
    }
    for (word, abbrev) in TITLES {
        let feats = if *abbrev { Features::ABBREVIATION } else { Features::empty() };
        lex.insert(word, Category::TITLE, feats, None);
    }
    for word in FIRST_NAMES {
        lex.insert(word, Category::FIRSTNAME, Features::empty(), None);
    }
    for word in COMMON_SURNAMES {
        lex.insert(word, Category::LASTNAME, Features::empty(), None);
    }
    for word in NAME_PARTICLES {
        lex.insert(word, Category::empty(), Features::NAME_PARTICLE | function, None);
    }
    for (word, abbrev) in NAME_SUFFIXES {
        let feats = if *abbrev { Features::ABBREVIATION } else { Features::empty() };
        lex.insert(word, Category::NAME_SUFFIX, feats, None);
    }
    for word in CITIES {
        lex.insert(word, Category::CITY, Features::empty(), None);
    }
    for word in STATES {
        lex.insert(word, Category::STATE, Features::empty(), None);
    }
    for word in STATE_ABBREVIATIONS {
        lex.insert(word, Category::STATE, Features::ABBREVIATION, None);
    }
    for word in COUNTRIES {
        lex.insert(word, Category::COUNTRY, Features::empty(), None);
    }
    for word in PLACES {
        lex.insert(word, Category::PLACE, Features::empty(), None);
    }
    for (word, cats) in COMPOUNDS {
        lex.insert(word, *cats, Features::empty(), None);
    }
    for word in TIMEZONES {
        lex.insert(word, Category::TIMEZONE, Features::empty(), None);
    }
    for word in DAYTIMES {
        lex.insert(word, Category::DAYTIME, Features::empty(), None);
    }
    for (word, n) in CARDINALS {
        lex.insert(word, Category::NUMBER, Features::empty(), Some(*n));
    }
    for (word, n) in MULTIPLIERS {
        lex.insert(word, Category::NUMBER, Features::MULTIPLIER, Some(*n));
    }
    for (word, n) in ORDINALS {
        lex.insert(word, Category::NUMBER | Category::ORDINAL, Features::empty(), Some(*n));
    }
    for (word, feats) in DETERMINERS {
        lex.insert(word, Category::DETERMINER, *feats | function, None);
    }
    for word in PREPOSITIONS {
        lex.insert(word, Category::PREPOSITION, function, None);
    }
    for word in PRONOUNS {
        lex.insert(word, Category::PRONOUN, function, None);
    }
    for word in CONJUNCTIONS {
        lex.insert(word, Category::CONJUNCTION, function, None);
    }
    for word in BREAK_WORDS {
        lex.insert(word, Category::CONJUNCTION, Features::BREAK_WORD | function, None);
    }
    for word in ADVERBS {
        lex.insert(word, Category::ADVERB, Features::empty(), None);
    }
    for word in ADJECTIVES {
        lex.insert(word, Category::ADJECTIVE, Features::empty(), None);
    }
    for word in NOUNS {
        lex.insert(word, Category::NOUN, Features::empty(), None);
    }
    for word in UNITS {
        lex.insert(word, Category::NOUN, Features::UNIT, None);
    }
    for word in VERBS {
        lex.insert(word, Category::VERB, Features::empty(), None);
    }
    for (word, pattern) in PATTERNS {
        lex.set_pattern(word, pattern);
    }
    // Irregular plurals.
    for word in ["people", "children", "feet", "men", "women", "data"] {
        lex.insert(word, Category::NOUN, Features::PLURAL, None);
    }
    // A period after these does not end the sentence.
    lex.insert("st", Category::empty(), Features::ABBREVIATION, None);
    lex.insert("inc", Category::empty(), Features::ABBREVIATION, None);
    lex.insert("etc", Category::empty(), Features::ABBREVIATION, None);
    lex.insert("'s", Category::POSSESSIVE, function, None);
}
