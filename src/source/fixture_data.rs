use crate::database::models::NewAdvocate;

const SPECIALTIES: &[&str] = &[
    "Bipolar",
    "LGBTQ",
    "Medication/Prescribing",
    "Suicide History/Attempts",
    "General Mental Health (anxiety, depression, stress, grief, life transitions)",
    "Men's issues",
    "Relationship Issues (family, friends, couple, etc)",
    "Trauma & PTSD",
    "Personality disorders",
    "Personal growth",
    "Substance use/abuse",
    "Pediatrics",
    "Women's issues (post-partum, infertility, family planning)",
    "Chronic pain",
    "Weight loss & nutrition",
    "Eating disorders",
    "Diabetic Diet and nutrition",
    "Coaching (leadership, career, academic and wellness)",
    "Life coaching",
    "Obsessive-compulsive disorders",
    "Neuropsychological evaluations & testing (ADHD testing)",
    "Attention and Hyperactivity (ADHD)",
    "Sleep issues",
    "Schizophrenia and psychotic disorders",
    "Learning disorders",
    "Domestic abuse",
];

// (first, last, city, degree, years, phone, specialty window start, window length)
const PEOPLE: &[(&str, &str, &str, &str, i32, i64, usize, usize)] = &[
    ("John", "Doe", "New York", "MD", 10, 5551234567, 0, 3),
    ("Jane", "Smith", "Los Angeles", "PhD", 8, 5559876543, 4, 2),
    ("Alice", "Johnson", "Chicago", "MSW", 5, 5554567890, 7, 4),
    ("Michael", "Brown", "Houston", "MD", 12, 5556543210, 10, 2),
    ("Emily", "Davis", "Phoenix", "PhD", 7, 5553210987, 12, 3),
    ("Chris", "Martinez", "Philadelphia", "MSW", 9, 5557890123, 15, 2),
    ("Jessica", "Taylor", "San Antonio", "MD", 11, 5554561234, 17, 3),
    ("David", "Harris", "San Diego", "PhD", 6, 5557896543, 20, 2),
    ("Laura", "Clark", "Dallas", "MSW", 4, 5550123456, 22, 3),
    ("Daniel", "Lewis", "San Jose", "MD", 13, 5553217654, 1, 5),
    ("Sarah", "Lee", "Austin", "PhD", 10, 5551238765, 6, 2),
    ("James", "King", "Jacksonville", "MSW", 5, 5556540987, 9, 4),
    ("Megan", "Green", "San Francisco", "MD", 14, 5559873456, 13, 1),
    ("Joshua", "Walker", "Columbus", "PhD", 9, 5556781234, 18, 3),
    ("Amanda", "Hall", "Fort Worth", "MSW", 3, 15559872345, 24, 2),
];

/// The built-in advocate dataset served without a store and used by `db seed`.
pub fn advocates() -> Vec<NewAdvocate> {
    PEOPLE
        .iter()
        .map(|&(first, last, city, degree, years, phone, start, len)| NewAdvocate {
            first_name: first.to_string(),
            last_name: last.to_string(),
            city: city.to_string(),
            degree: degree.to_string(),
            specialties: SPECIALTIES
                .iter()
                .cycle()
                .skip(start)
                .take(len)
                .map(|s| s.to_string())
                .collect(),
            years_of_experience: years,
            phone_number: phone,
        })
        .collect()
}
