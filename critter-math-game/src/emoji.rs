//! Emoji used to illustrate operands.
use rand::Rng;

pub const EMOJI_PALETTE: [&str; 70] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵", "🐔",
    "🐧", "🐤", "🦆", "🦅", "🦉", "🦇", "🐺", "🐗", "🐴", "🦓", "🦒", "🐢", "🐍", "🐊", "🐙", "🦑",
    "🦀", "🐠", "🐟", "🐬", "🐳", "🦈", "🦭", "🐋", "🐌", "🐛", "🦋", "🐞", "🐜", "🪲", "🐝", "🐞",
    "🦗", "🕷️", "🍎", "🍌", "🍇", "🍓", "🍒", "🍍", "🥝", "🥕", "🍉", "🍊", "🍪", "🍩", "🍰", "🍦",
    "🍫", "🍬", "🍿", "🍔", "🍟", "🍕",
];

/// Pick a random emoji, never returning `exclude`.
pub fn pick_emoji(rng: &mut impl Rng, exclude: Option<&str>) -> &'static str {
    loop {
        let candidate = EMOJI_PALETTE[rng.gen_range(0..EMOJI_PALETTE.len())];
        if Some(candidate) != exclude {
            return candidate;
        }
    }
}

/// Two different emoji, one per operand.
pub fn pick_emoji_pair(rng: &mut impl Rng) -> (&'static str, &'static str) {
    let first = pick_emoji(rng, None);
    let second = pick_emoji(rng, Some(first));
    (first, second)
}
