use crate::models::ServicePackage;

/// Display name recorded when a submitted package id is not in the catalog.
pub const NOT_FOUND_NAME: &str = "Tidak Ditemukan";

static PACKAGES: [ServicePackage; 4] = [
    ServicePackage {
        id: "pernikahan",
        name: "Paket Pernikahan",
        description: "Abadikan setiap momen sakral di hari bahagia Anda dengan hasil yang sinematik dan tak terlupakan.",
        price: "Mulai dari Rp 5.500.000",
        features: &[
            "8 Jam Liputan",
            "2 Fotografer",
            "1 Album Kolase Eksklusif",
            "Semua File Diberikan",
        ],
    },
    ServicePackage {
        id: "prewedding",
        name: "Paket Pre-Wedding",
        description: "Ceritakan kisah cinta Anda melalui sesi foto pre-wedding yang kreatif dan personal di lokasi pilihan Anda.",
        price: "Mulai dari Rp 2.800.000",
        features: &[
            "4 Jam Sesi Foto",
            "1 Fotografer",
            "25 Foto Edit Terbaik",
            "Cetak 2 Foto 16R",
        ],
    },
    ServicePackage {
        id: "acara",
        name: "Paket Acara Spesial",
        description: "Liputan untuk berbagai acara penting seperti ulang tahun, lamaran, atau acara perusahaan.",
        price: "Mulai dari Rp 1.500.000",
        features: &[
            "3 Jam Liputan",
            "1 Fotografer",
            "75+ Foto Edit",
            "Link Google Drive",
        ],
    },
    ServicePackage {
        id: "wisuda",
        name: "Paket Wisuda",
        description: "Rayakan kelulusan Anda dengan foto yang elegan dan penuh kenangan bersama keluarga dan teman.",
        price: "Mulai dari Rp 1.500.000",
        features: &[
            "2 Jam Sesi Foto",
            "1 Fotografer",
            "20 Foto Edit Terbaik",
            "Cetak 1 Foto 12R + Frame",
        ],
    },
];

pub fn list_packages() -> &'static [ServicePackage] {
    &PACKAGES
}

pub fn find(id: &str) -> Option<&'static ServicePackage> {
    PACKAGES.iter().find(|pkg| pkg.id == id)
}

/// Never fails: unknown ids resolve to [`NOT_FOUND_NAME`].
pub fn resolve_name(id: &str) -> &'static str {
    find(id).map(|pkg| pkg.name).unwrap_or(NOT_FOUND_NAME)
}
