//! Phrase lists for Indonesian e-commerce reviews.
//!
//! Compiled in and versioned by [`LEXICON_VERSION`]. Bump the version on any
//! edit so exported results can be traced back to the list that produced them.

pub const LEXICON_VERSION: &str = "2025.1";

/// Short acknowledgement tokens that carry no information on their own.
/// Matched against the whole review, never as a substring.
pub const GENERIC_PHRASES: &[&str] = &[
    "ok", "oke", "sip", "mantap", "nice", "good", "top", "not", "sesuai",
];

/// Punctuation marks whose presence suggests a hand-written sentence.
pub const NATURAL_PUNCTUATION: &[&str] = &[".", ",", "...", "!"];

/// Phrases typical of genuine buyers: fit and fabric, delivery and packaging,
/// seller responsiveness, repurchase intent.
pub const NATURAL_PHRASES: &[&str] = &[
    // product
    "bagus",
    "keren",
    "mantap",
    "kualitas oke",
    "pas di badan",
    "adem",
    "nyaman dipakai",
    "lembut",
    "halus",
    "enak dipakai",
    "bagus banget",
    "real pict",
    "gak nyesel beli",
    "recommended",
    "puas",
    "ukuran pas",
    "sesuai deskripsi",
    "sesuai gambar",
    "cutting rapi",
    "tipis tapi nyaman",
    "ringan di badan",
    "warna sesuai",
    "motifnya bagus",
    "jatuhnya bagus di badan",
    // shipping
    "cepat sampai",
    "pengiriman cepat",
    "dikirim hari itu juga",
    "packaging rapi",
    "packing aman",
    "barang sampai dengan selamat",
    "sesuai estimasi",
    // seller
    "fast respon",
    "seller ramah",
    "penjual ramah",
    "respon cepat",
    "cs responsif",
    "penjualnya baik",
    // experience
    "bahannya adem dan nyaman banget",
    "suka banget sama bajunya",
    "bakal order lagi deh",
    "baru nyoba dan langsung suka",
    "beli buat seragaman, cocok semua",
    "cocok buat dipakai harian",
    "pas di badan, nggak kegedean/kekecilan",
    "beli karena lihat review, ternyata beneran bagus",
    "next order lagi",
    "baru sampai langsung coba, puas banget",
];
