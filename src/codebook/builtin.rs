//! Standard code tables of the questionnaire.
//!
//! Labels are listed in code order starting at 1. Categories are inclusive
//! code ranges.

pub(super) const MAJOR_LABELS: &[&str] = &[
    "Architecture",
    "Real Estate & Construction",
    "Civil",
    "Survey",
    "Design",
    "Fashion & Textile",
    "Music",
    "Visual Art",
    "Accounting",
    "Aviation Management",
    "Economics",
    "Finance",
    "Logistics",
    "Hotel & Tourism Management",
    "Human Resources",
    "Investment",
    "Management",
    "Marketing",
    "Risk Management",
    "Property Management",
    "General Education",
    "Physical Education",
    "Pre-school Education",
    "Special Education",
    "Computer Engineering",
    "Mechanical / Electrical",
    "Aviation Engineering",
    "Science Engineering",
    "Anthropology",
    "Cultural Studies",
    "History",
    "Philosophy",
    "Religion",
    "Chinese (Literature)",
    "English (Literature)",
    "Linguistics",
    "Translation",
    "Other Languages",
    "Law",
    "Film and Media Arts",
    "Journalism & Communication",
    "Creative Media",
    "Medicine / Surgery",
    "Dental",
    "Chinese Medicine",
    "Veterinary",
    "Pharmacy",
    "Nursing",
    "Therapy",
    "Nutrition",
    "Biomedical",
    "Public Health",
    "Physics",
    "Chemistry",
    "Biology",
    "Biochemistry",
    "Environmental Science",
    "Mathematics",
    "Statistics",
    "Actuarial",
    "Computer Science",
    "Artificial Intelligence (AI)",
    "Government & Administration",
    "Criminology",
    "Psychology",
    "Sociology",
    "Social Work",
    "Geography",
    "Culinary Arts and Management",
    "Game Design",
    "Urban Studies",
    "Others",
];

pub(super) const MAJOR_CATEGORIES: &[(&str, i64, i64)] = &[
    ("Architecture", 1, 4),
    ("Art", 5, 8),
    ("Business", 9, 20),
    ("Education", 21, 24),
    ("Engineering", 25, 28),
    ("Humanities", 29, 33),
    ("Language", 34, 38),
    ("Law", 39, 39),
    ("Media", 40, 42),
    ("Medicine", 43, 52),
    ("Science", 53, 62),
    ("Social Science", 63, 68),
    ("Others", 69, 72),
];

pub(super) const OCCUPATION_LABELS: &[&str] = &[
    "Architecture",
    "Surveying",
    "Construction",
    "Civil",
    "Design",
    "Entertainment / Music",
    "Fashion Design",
    "Photography",
    "Advertising",
    "Administration / Management",
    "Asset Management / Stock",
    "Banking / Finance",
    "Hospitality / Tourism",
    "Human Resources",
    "Marketing / Public Relations",
    "Insurance",
    "Property / Real Estate",
    "Risk Management",
    "Start-up Business",
    "General Education",
    "Physical Education",
    "Pre-School Education",
    "Special Education",
    "Computer Engineering",
    "Mechanical Engineering",
    "Aviation Engineering",
    "Science Engineering",
    "Manufacturing",
    "Legal",
    "Accounting / Audit",
    "Actuary",
    "Translation",
    "Media / Journalism",
    "Digital Marketing",
    "Film / Television Production",
    "Youtuber",
    "Medical Service",
    "Specialist",
    "General Practitioner",
    "Veterinary",
    "Pharmacy",
    "Psychologist",
    "Nutritionist",
    "Therapist",
    "Chinese Medicine Practitioner",
    "Biomedical",
    "Nursing",
    "Information Technology (IT)",
    "Data Science",
    "Artificial Intelligence (AI)",
    "Biochemistry",
    "Laboratory",
    "Environmental Science",
    "Aviation",
    "Social Service",
    "Social Work",
    "Retail & Food & Beverage",
    "Import / Export / Wholesale",
    "Logistics",
    "Trading",
    "Transportation",
    "Civil Servant (Clerical)",
    "Fireman",
    "Paramedic",
    "Customs Officer",
    "Immigration Officer",
    "Chef",
    "Pastry Chef",
    "Pet Groomer",
    "Beautician",
    "Makeup Artist",
    "Archaeologist",
    "Game Designer",
    "Librarian",
    "Cartoonist",
    "Others",
];

pub(super) const OCCUPATION_CATEGORIES: &[(&str, i64, i64)] = &[
    ("Architecture", 1, 4),
    ("Art", 5, 8),
    ("Business", 9, 19),
    ("Education", 20, 23),
    ("Engineering", 24, 28),
    ("Professional", 29, 32),
    ("Media", 33, 36),
    ("Medicine", 37, 47),
    ("Science", 48, 53),
    ("Service", 54, 57),
    ("Trading and Logistics", 58, 61),
    ("Government", 62, 66),
    ("Others", 67, 76),
];
