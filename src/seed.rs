use crate::db::Database;
use crate::error::Result;
use crate::models::{AnswerKey, NewQuestion};

type SeedRow = (&'static str, &'static str, &'static str, &'static str, &'static str, AnswerKey);

// The stock question bank: (question, option_a..option_d, correct letter).
const DS_3850: &[SeedRow] = &[
    ("What is the output of `print(2 ** 3)` in Python?", "6", "8", "5", "1.6", AnswerKey::B),
    ("Which keyword is used to define a function in Python?", "def", "fun", "function", "define", AnswerKey::A),
    ("How do you add a single-line comment in a Python script?", "# This is a comment", "// This is a comment", "/* This is a comment */", "<!-- This is a comment -->", AnswerKey::A),
    ("What data type is the object `['apple', 'banana', 'cherry']`?", "tuple", "set", "list", "dictionary", AnswerKey::C),
    ("Which method removes the last item from a list and returns it?", "pop()", "remove()", "last()", "delete()", AnswerKey::A),
    ("How do you start a `for` loop to iterate five times (from 0 to 4)?", "for i in range(5):", "for i in range(1, 5):", "for i in 5:", "for i in [0..4]:", AnswerKey::A),
    ("What is the result of the expression `3 / 2` in Python 3?", "1", "1.5", "2", "Error", AnswerKey::B),
    ("Which of the following is used to create a dictionary in Python?", "[]", "()", "{}", "<<>>", AnswerKey::C),
    ("Which operator is used to check if two values are equal?", "=", "==", "is", "!=", AnswerKey::B),
    ("What does the `str(123)` function do?", "Returns a string representation of the object", "Causes a syntax error", "Checks if 123 is a string", "Slices a string", AnswerKey::A),
];

const DS_3860: &[SeedRow] = &[
    ("What does SQL stand for?", "Structured Query Language", "Strong Question Language", "Standard Query Language", "Sequential Query Language", AnswerKey::A),
    ("Which SQL clause is used to filter the results of a query?", "FILTER", "GROUP BY", "ORDER BY", "WHERE", AnswerKey::D),
    ("What is a PRIMARY KEY used for in a database table?", "To uniquely identify each record", "To link two tables together", "To be the first column of a table", "To sort the data automatically", AnswerKey::A),
    ("What is the main goal of database normalization?", "To increase query speed", "To reduce data redundancy", "To make the database larger", "To complicate the schema", AnswerKey::B),
    ("Which type of JOIN returns all records from the left table and the matched records from the right table?", "INNER JOIN", "RIGHT JOIN", "LEFT JOIN", "FULL OUTER JOIN", AnswerKey::C),
    ("A FOREIGN KEY in one table points to a __________ in another table.", "FOREIGN KEY", "PRIMARY KEY", "UNIQUE KEY", "INDEX", AnswerKey::B),
    ("Which SQL statement is used to add new data to a database?", "ADD RECORD", "INSERT INTO", "UPDATE", "CREATE", AnswerKey::B),
    ("The First Normal Form (1NF) deals with eliminating what?", "Transitive dependencies", "Partial dependencies", "Repeating groups and ensuring atomicity", "Redundant data", AnswerKey::C),
    ("The structure of a database, including its tables, columns, and relationships, is called its:", "Schema", "Instance", "Index", "View", AnswerKey::A),
    ("Which normal form deals with removing transitive partial dependencies?", "1NF", "2NF", "3NF", "BCNF", AnswerKey::C),
];

const HIST_4093: &[SeedRow] = &[
    ("In which New York City borough did hip hop culture originate in the 1970s?", "Brooklyn", "The Bronx", "Queens", "Manhattan", AnswerKey::B),
    ("Who is often called the 'father' of hip hop for his pioneering use of 'breakbeats'?", "Grandmaster Flash", "Afrika Bambaataa", "DJ Kool Herc", "Sugarhill Gang", AnswerKey::C),
    ("Which of the following is NOT considered one of the four traditional elements of hip hop culture?", "DJing", "MCing", "Fashion", "Graffiti Art", AnswerKey::C),
    ("Which group released the socially conscious and influential track 'The Message' in 1982?", "Run-DMC", "Public Enemy", "N.W.A.", "Grandmaster Flash and the Furious Five", AnswerKey::D),
    ("Who founded the Universal Zulu Nation, an organization promoting hip hop culture?", "Russell Simmons", "Afrika Bambaataa", "Rick Rubin", "Dr. Dre", AnswerKey::B),
    ("What 1979 song by The Sugarhill Gang is widely considered the first commercially successful hip hop record?", "Planet Rock", "The Breaks", "Rapper's Delight", "King Tim III", AnswerKey::C),
    ("The 'Golden Age' of hip hop is most commonly associated with which time period?", "1979-1984", "Late 1980s to mid-1990s", "Late 1990s to early 2000s", "2010-present", AnswerKey::B),
    ("N.W.A. was a pioneering and controversial group in which subgenre of hip hop?", "Conscious Hip Hop", "Jazz Rap", "Gangsta Rap", "Trap", AnswerKey::C),
    ("Which producer was the primary architect of the 'G-funk' sound and a co-founder of Death Row Records?", "DJ Premier", "The RZA", "J Dilla", "Dr. Dre", AnswerKey::D),
    ("What is the art of improvised, freestyle rapping in a competitive setting often called?", "Spitting", "Flowing", "Battling", "Storytelling", AnswerKey::C),
];

const MKT_4100: &[SeedRow] = &[
    ("A tax imposed by a government on imported goods is called a(n):", "Quota", "Embargo", "Tariff", "Subsidy", AnswerKey::C),
    ("The practice of selling goods in a foreign market at a price below their cost of production is known as:", "Dumping", "Licensing", "Exporting", "Countertrade", AnswerKey::A),
    ("Which global market entry strategy offers the lowest risk but also the least control?", "Joint Venture", "Direct Investment", "Licensing", "Exporting", AnswerKey::D),
    ("The BRICS countries, a major bloc of emerging economies, includes Brazil, Russia, India, China, and which other country?", "Singapore", "South Korea", "South Africa", "Spain", AnswerKey::C),
    ("Modifying a product's features, packaging, or quality to meet the needs of a specific foreign market is called:", "Product Standardization", "Product Invention", "Product Adaptation", "Product Diversification", AnswerKey::C),
    ("An unconscious belief that one's own culture and way of doing things is superior is known as:", "Polycentrism", "Geocentrism", "Regiocentrism", "Ethnocentrism", AnswerKey::D),
    ("A 'gray market' refers to:", "A market for second-hand goods", "The sale of goods through unofficial or unauthorized channels", "A market with very little government regulation", "A market for environmentally friendly products", AnswerKey::B),
    ("When two or more companies join to create a new business entity to enter a foreign market, it's called a:", "Franchise", "Strategic Alliance", "Joint Venture", "Merger", AnswerKey::C),
    ("Using the exact same marketing strategy and mix in all international markets is known as:", "Adapted global marketing", "Standardized global marketing", "Concentrated global marketing", "Localized global marketing", AnswerKey::B),
    ("Hofstede's cultural dimensions theory is primarily used to understand:", "Economic development across nations", "Political stability in a region", "Differences in cultural values across countries", "Global supply chain logistics", AnswerKey::C),
];

pub const STOCK_COURSES: &[(&str, &[SeedRow])] = &[
    ("DS 3850", DS_3850),
    ("DS 3860", DS_3860),
    ("HIST 4093", HIST_4093),
    ("MKT 4100", MKT_4100),
];

/// Creates and populates the stock courses through the normal validated
/// insert path. Courses that already exist are skipped, so re-running
/// `init --seed` is harmless. Returns the number of courses seeded.
pub fn seed_stock_courses(db: &Database) -> Result<usize> {
    let mut seeded = 0;
    for (course, rows) in STOCK_COURSES {
        if db.course_exists(course)? {
            log::debug!("course '{}' already present, skipping seed", course);
            continue;
        }
        db.create_course(course)?;
        for (question, a, b, c, d, correct) in rows.iter() {
            let payload = NewQuestion {
                question: (*question).to_string(),
                option_a: (*a).to_string(),
                option_b: (*b).to_string(),
                option_c: (*c).to_string(),
                option_d: (*d).to_string(),
                correct: *correct,
            };
            db.insert_question(course, &payload)?;
        }
        log::info!("seeded course '{}' with {} questions", course, rows.len());
        seeded += 1;
    }
    Ok(seeded)
}
