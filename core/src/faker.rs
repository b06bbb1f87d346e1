//! Deterministic Spanish-locale identity generation using curated value
//! lists.
//!
//! The datasets model a Spanish insurer, so names, provinces, postcodes,
//! phone numbers and IBANs all follow es-ES conventions. All generation is
//! deterministic (same RNG seed = same values).

use crate::rng::StageRng;
use crate::types::Date;

/// Deterministic identity-field generator backed by curated lists.
pub struct SpanishFaker;

impl SpanishFaker {
    /// Full name in the Spanish convention: given name + two surnames.
    pub fn full_name(rng: &mut StageRng) -> String {
        let first = Self::pick(rng, Self::first_names());
        let paternal = Self::pick(rng, Self::last_names());
        let maternal = Self::pick(rng, Self::last_names());
        format!("{first} {paternal} {maternal}")
    }

    /// Email derived from a full name, accent-folded and dot-joined.
    pub fn email(rng: &mut StageRng, full_name: &str) -> String {
        let local: String = full_name
            .split_whitespace()
            .map(fold_ascii)
            .collect::<Vec<_>>()
            .join(".");
        let domain = Self::pick(rng, Self::email_domains());
        format!("{}@{}", local.to_lowercase(), domain)
    }

    /// Spanish mobile number: +34, leading 6, grouped digits.
    pub fn phone_number(rng: &mut StageRng) -> String {
        format!(
            "+34 6{:02} {:03} {:03}",
            rng.next_u64_below(100),
            rng.next_u64_below(1000),
            rng.next_u64_below(1000)
        )
    }

    /// Street address: "Calle Mayor 42" style.
    pub fn street_address(rng: &mut StageRng) -> String {
        let kind = Self::pick(rng, Self::street_kinds());
        let name = Self::pick(rng, Self::street_names());
        let number = rng.range_i64(1, 120);
        format!("{kind} {name} {number}")
    }

    /// One of the Spanish provinces.
    pub fn state(rng: &mut StageRng) -> &'static str {
        Self::pick(rng, Self::provinces())
    }

    /// 5-digit postcode; the first two digits are a province code (01-52).
    pub fn post_code(rng: &mut StageRng) -> String {
        format!(
            "{:02}{:03}",
            rng.range_i64(1, 52),
            rng.next_u64_below(1000)
        )
    }

    /// Spanish IBAN: ES + 2 check digits + 20 account digits.
    pub fn iban(rng: &mut StageRng) -> String {
        let mut digits = String::with_capacity(22);
        for _ in 0..22 {
            digits.push(char::from(b'0' + rng.next_u64_below(10) as u8));
        }
        format!("ES{digits}")
    }

    /// Job title from a curated list.
    pub fn job(rng: &mut StageRng) -> &'static str {
        Self::pick(rng, Self::jobs())
    }

    /// Date of birth between 18 and 90 years before `today`.
    pub fn date_of_birth(rng: &mut StageRng, today: Date) -> Date {
        let days_back = rng.range_i64(18 * 365, 90 * 365);
        today - chrono::Duration::days(days_back)
    }

    fn pick<'a>(rng: &mut StageRng, pool: &'a [&'a str]) -> &'a str {
        pool[rng.next_u64_below(pool.len() as u64) as usize]
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "Antonio", "Manuel", "Jose", "Francisco", "David", "Juan", "Javier", "Daniel",
            "Carlos", "Miguel", "Rafael", "Pedro", "Angel", "Alejandro", "Fernando", "Pablo",
            "Sergio", "Jorge", "Alberto", "Luis", "Alvaro", "Adrian", "Diego", "Raul",
            "Enrique", "Ivan", "Ruben", "Oscar", "Andres", "Joaquin", "Santiago", "Victor",
            "Maria", "Carmen", "Ana", "Isabel", "Laura", "Cristina", "Marta", "Dolores",
            "Lucia", "Elena", "Pilar", "Sara", "Paula", "Raquel", "Rocio", "Beatriz",
            "Nuria", "Silvia", "Montserrat", "Alba", "Irene", "Patricia", "Andrea", "Rosa",
            "Julia", "Teresa", "Inmaculada", "Mercedes", "Sonia", "Clara", "Eva", "Natalia",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Garcia", "Rodriguez", "Gonzalez", "Fernandez", "Lopez", "Martinez", "Sanchez",
            "Perez", "Gomez", "Martin", "Jimenez", "Ruiz", "Hernandez", "Diaz", "Moreno",
            "Munoz", "Alvarez", "Romero", "Alonso", "Gutierrez", "Navarro", "Torres",
            "Dominguez", "Vazquez", "Ramos", "Gil", "Ramirez", "Serrano", "Blanco", "Molina",
            "Morales", "Suarez", "Ortega", "Delgado", "Castro", "Ortiz", "Rubio", "Marin",
            "Sanz", "Iglesias", "Nunez", "Medina", "Garrido", "Cortes", "Castillo", "Santos",
            "Lozano", "Guerrero", "Cano", "Prieto", "Mendez", "Calvo", "Cruz", "Gallego",
            "Vidal", "Leon", "Herrera", "Marquez", "Pena", "Flores", "Cabrera", "Campos",
        ]
    }

    fn street_kinds() -> &'static [&'static str] {
        &["Calle", "Avenida", "Plaza", "Paseo", "Camino", "Travesia", "Ronda"]
    }

    fn street_names() -> &'static [&'static str] {
        &[
            "Mayor", "Real", "del Sol", "de la Constitucion", "de la Iglesia", "Nueva",
            "del Carmen", "de Cervantes", "de Goya", "de Velazquez", "del Prado",
            "de la Paz", "de America", "de Europa", "del Pilar", "de San Juan",
            "de Santa Ana", "del Rosario", "de los Reyes", "de la Fuente", "del Mar",
            "de las Flores", "de la Luna", "del Norte",
        ]
    }

    fn provinces() -> &'static [&'static str] {
        &[
            "Madrid", "Barcelona", "Valencia", "Sevilla", "Zaragoza", "Malaga", "Murcia",
            "Alicante", "Cadiz", "La Coruna", "Granada", "Vizcaya", "Asturias", "Badajoz",
            "Toledo", "Navarra", "Salamanca", "Burgos", "Cantabria", "Huelva", "Leon",
            "Tarragona", "Girona", "Almeria", "Albacete", "Valladolid", "Caceres",
            "Guadalajara", "Lugo", "Cuenca", "Teruel", "Soria",
        ]
    }

    fn email_domains() -> &'static [&'static str] {
        &[
            "example.com", "example.org", "example.net", "correo.es", "mail.es",
        ]
    }

    fn jobs() -> &'static [&'static str] {
        &[
            "Abogado", "Arquitecto", "Carpintero", "Cocinero", "Conductor", "Contable",
            "Dentista", "Economista", "Electricista", "Enfermero", "Farmaceutico",
            "Fisioterapeuta", "Fontanero", "Informatico", "Ingeniero civil", "Jardinero",
            "Maestro", "Mecanico", "Medico", "Panadero", "Peluquero", "Periodista",
            "Policia", "Profesor", "Psicologo", "Recepcionista", "Soldador", "Traductor",
            "Veterinario", "Agricultor", "Bibliotecario", "Camarero",
        ]
    }
}

/// Fold the handful of accented characters the curated lists could carry
/// into plain ASCII (used for email local parts).
fn fold_ascii(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'á' | 'à' => 'a',
            'é' | 'è' => 'e',
            'í' => 'i',
            'ó' | 'ò' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
