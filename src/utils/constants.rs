/// Snowman geometry
pub const COMPACTION_FACTOR: f64 = 0.4;
/// Height per cube-root of volume for an 8:10 head:body snowman.
pub const SNOWMAN_HEIGHT_RATIO: f64 = 1.94;
pub const SQUARE_METRES_PER_SQUARE_KM: f64 = 1_000_000.0;
pub const CENTIMETRES_PER_METRE: f64 = 100.0;

/// CSV key column names (matched case-insensitively)
pub const DAILY_DATE_COLUMNS: &[&str] = &["date", "日付"];
pub const MONTHLY_KEY_COLUMNS: &[&str] = &["month", "年月"];

/// Date formats accepted in source files
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日"];
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Cells read as missing readings (compared after trimming)
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "", "-", "--", "#N/A", "#NA", "<NA>", "N/A", "n/a", "NA", "NaN", "-NaN", "nan", "-nan",
    "NULL", "null", "None",
];

/// Processing defaults
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_DATABASE_PATH: &str = "snow.db";
pub const DEFAULT_CONFIG_FILE: &str = "snowman.toml";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const ENV_PREFIX: &str = "SNOWMAN";

/// JIS X 0401 prefecture codes
pub const JIS_PREFECTURE_CODES: &[(&str, i64)] = &[
    ("北海道", 1),
    ("青森県", 2),
    ("岩手県", 3),
    ("宮城県", 4),
    ("秋田県", 5),
    ("山形県", 6),
    ("福島県", 7),
    ("茨城県", 8),
    ("栃木県", 9),
    ("群馬県", 10),
    ("埼玉県", 11),
    ("千葉県", 12),
    ("東京都", 13),
    ("神奈川県", 14),
    ("新潟県", 15),
    ("富山県", 16),
    ("石川県", 17),
    ("福井県", 18),
    ("山梨県", 19),
    ("長野県", 20),
    ("岐阜県", 21),
    ("静岡県", 22),
    ("愛知県", 23),
    ("三重県", 24),
    ("滋賀県", 25),
    ("京都府", 26),
    ("大阪府", 27),
    ("兵庫県", 28),
    ("奈良県", 29),
    ("和歌山県", 30),
    ("鳥取県", 31),
    ("島根県", 32),
    ("岡山県", 33),
    ("広島県", 34),
    ("山口県", 35),
    ("徳島県", 36),
    ("香川県", 37),
    ("愛媛県", 38),
    ("高知県", 39),
    ("福岡県", 40),
    ("佐賀県", 41),
    ("長崎県", 42),
    ("熊本県", 43),
    ("大分県", 44),
    ("宮崎県", 45),
    ("鹿児島県", 46),
    ("沖縄県", 47),
];
