/// Shown for any asset id not in [`ICONS`].
pub const PLACEHOLDER_ICON_URL: &str = "https://via.placeholder.com/64";

/// Static asset id → icon image URL table (hosted by CoinGecko).
pub const ICONS: [(&str, &str); 10] = [
    ("bitcoin", "https://assets.coingecko.com/coins/images/1/large/bitcoin.png"),
    ("ethereum", "https://assets.coingecko.com/coins/images/279/large/ethereum.png"),
    ("litecoin", "https://assets.coingecko.com/coins/images/2/large/litecoin.png"),
    ("ripple", "https://assets.coingecko.com/coins/images/44/large/xrp-symbol-white-128.png"),
    ("cardano", "https://assets.coingecko.com/coins/images/975/large/cardano.png"),
    ("polkadot", "https://assets.coingecko.com/coins/images/12171/large/polkadot.png"),
    ("dogecoin", "https://assets.coingecko.com/coins/images/5/large/dogecoin.png"),
    ("solana", "https://assets.coingecko.com/coins/images/4128/large/solana.png"),
    ("tether", "https://assets.coingecko.com/coins/images/325/large/Tether.png"),
    ("usd-coin", "https://assets.coingecko.com/coins/images/6319/large/usdc.png"),
];

/// Icon URL for `id`, or the placeholder for unknown ids.
pub fn icon_url(id: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, url)| *url)
        .unwrap_or(PLACEHOLDER_ICON_URL)
}
