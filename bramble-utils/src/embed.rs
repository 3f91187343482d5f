/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x53_7A_3B;
