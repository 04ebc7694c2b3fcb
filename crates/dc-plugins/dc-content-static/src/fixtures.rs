//! Hard-coded site content.

use chrono::NaiveDate;
use dc_core::models::{
    BlogCategory, BlogPost, ClinicInfo, Department, Doctor, Faq, GalleryCategory, GalleryItem,
    PostalAddress, RecordId, Service, Treatment,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn blog_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: RecordId(1),
            title: "The Ultimate Guide to Anti-Aging Skincare in 2025".into(),
            excerpt: "Discover the latest breakthrough treatments and ingredients that are revolutionizing anti-aging skincare. From cutting-edge laser therapies to innovative injectables.".into(),
            author: "Dr. Sarah Johnson".into(),
            author_title: "Board-Certified Dermatologist".into(),
            published_on: date(2024, 12, 15),
            read_time: "8 min read".into(),
            category: BlogCategory::AntiAging,
            tags: strings(&["skincare", "anti-aging", "treatments", "laser"]),
            featured: true,
            likes: 245,
            comments: 32,
            views: 1520,
            body: strings(&[
                "Aging affects everyone, but modern dermatology offers real tools to slow, prevent and even reverse many of its visible signs.",
                "Intrinsic factors such as genetics, hormonal change and slower cell turnover combine with extrinsic ones: UV exposure, pollution, smoking and poor sleep.",
                "Fractional CO2 lasers, radiofrequency microneedling and IPL photofacials now deliver visible results with far less downtime than a decade ago.",
                "At home, retinoids remain the gold standard, supported by peptides and antioxidants such as vitamin C and niacinamide, and a daily broad-spectrum sunscreen.",
            ]),
        },
        BlogPost {
            id: RecordId(2),
            title: "Hair Restoration: Modern Solutions for Thinning Hair".into(),
            excerpt: "Explore the latest advances in hair restoration technology, from FUE transplants to PRP therapy and beyond. Learn what works best for different types of hair loss.".into(),
            author: "Dr. Michael Chen".into(),
            author_title: "Hair Restoration Specialist".into(),
            published_on: date(2024, 12, 10),
            read_time: "6 min read".into(),
            category: BlogCategory::HairRestoration,
            tags: strings(&["hair", "restoration", "transplant", "PRP"]),
            featured: true,
            likes: 189,
            comments: 28,
            views: 980,
            body: strings(&[
                "Hair loss has many causes, and the right treatment depends on which one is at work.",
                "Follicular unit extraction moves individual follicles without a linear scar, while PRP therapy uses growth factors from your own blood to strengthen existing hair.",
            ]),
        },
        BlogPost {
            id: RecordId(3),
            title: "Understanding Acne: Causes and Advanced Treatments".into(),
            excerpt: "Comprehensive guide to acne management, including hormonal factors, dietary influences, and the most effective treatment options available today.".into(),
            author: "Dr. Emily Rodriguez".into(),
            author_title: "Laser & Aesthetic Medicine Specialist".into(),
            published_on: date(2024, 12, 5),
            read_time: "10 min read".into(),
            category: BlogCategory::AcneTreatment,
            tags: strings(&["acne", "dermatology", "treatment", "skincare"]),
            featured: false,
            likes: 156,
            comments: 41,
            views: 1200,
            body: strings(&[
                "Acne starts in the pilosebaceous unit, where excess oil, dead cells and bacteria combine into inflammation.",
                "Topical retinoids, targeted antibiotics, hormonal therapy and isotretinoin each have a place, often in combination.",
            ]),
        },
        BlogPost {
            id: RecordId(4),
            title: "The Science Behind Laser Skin Rejuvenation".into(),
            excerpt: "Deep dive into how laser technology works to improve skin texture, reduce wrinkles, and treat pigmentation issues with minimal downtime.".into(),
            author: "Dr. Sarah Johnson".into(),
            author_title: "Board-Certified Dermatologist".into(),
            published_on: date(2024, 11, 28),
            read_time: "7 min read".into(),
            category: BlogCategory::LaserTreatments,
            tags: strings(&["laser", "rejuvenation", "technology", "skincare"]),
            featured: false,
            likes: 203,
            comments: 19,
            views: 890,
            body: strings(&[
                "Lasers deliver light at a single wavelength that targets water, pigment or blood vessels in the skin.",
                "Fractional devices treat a grid of microscopic columns, leaving healthy tissue in between to speed healing.",
            ]),
        },
        BlogPost {
            id: RecordId(5),
            title: "Injectables 101: Botox vs Fillers - What You Need to Know".into(),
            excerpt: "Complete comparison of neuromodulators and dermal fillers, including their uses, benefits, and how to choose the right treatment for your goals.".into(),
            author: "Dr. Emily Rodriguez".into(),
            author_title: "Laser & Aesthetic Medicine Specialist".into(),
            published_on: date(2024, 11, 20),
            read_time: "5 min read".into(),
            category: BlogCategory::Injectables,
            tags: strings(&["injectables", "botox", "fillers", "cosmetic"]),
            featured: false,
            likes: 178,
            comments: 35,
            views: 1450,
            body: strings(&[
                "Neuromodulators relax the muscles that cause expression lines; fillers restore volume lost with age.",
                "Many patients benefit from both, planned together at a single consultation.",
            ]),
        },
        BlogPost {
            id: RecordId(6),
            title: "Non-Surgical Body Contouring: What Really Works?".into(),
            excerpt: "Evidence-based review of popular non-invasive body contouring treatments including CoolSculpting, EMSCULPT, and radiofrequency therapy.".into(),
            author: "Dr. Michael Chen".into(),
            author_title: "Hair Restoration Specialist".into(),
            published_on: date(2024, 11, 15),
            read_time: "9 min read".into(),
            category: BlogCategory::BodyContouring,
            tags: strings(&["body", "contouring", "non-surgical", "technology"]),
            featured: false,
            likes: 134,
            comments: 22,
            views: 780,
            body: strings(&[
                "Cryolipolysis, high-intensity electromagnetic muscle stimulation and radiofrequency each work on a different tissue.",
                "Results build over weeks, and realistic expectations matter as much as the device.",
            ]),
        },
    ]
}

pub(crate) fn gallery_items() -> Vec<GalleryItem> {
    let item = |id: u32,
                category: GalleryCategory,
                treatment: &str,
                patient: &str,
                description: &str,
                tags: &[&str],
                likes: u32,
                views: u32,
                taken_on: NaiveDate| GalleryItem {
        id: RecordId(id),
        category,
        treatment: treatment.into(),
        patient: patient.into(),
        description: description.into(),
        tags: strings(tags),
        likes,
        views,
        taken_on,
    };

    vec![
        item(1, GalleryCategory::Acne, "Acne Treatment", "Female, 28", "Complete acne clearance after 6 months of treatment", &["acne", "scarring", "transformation"], 234, 1520, date(2024, 1, 15)),
        item(2, GalleryCategory::Hair, "FUE Hair Transplant", "Male, 35", "Natural hairline restoration with 3,000 grafts", &["hair", "transplant", "natural"], 189, 980, date(2024, 2, 20)),
        item(3, GalleryCategory::Laser, "Laser Resurfacing", "Female, 42", "Full facial rejuvenation with CO2 laser", &["laser", "rejuvenation", "anti-aging"], 312, 2100, date(2024, 3, 10)),
        item(4, GalleryCategory::Injectables, "Dermal Fillers", "Female, 38", "Non-surgical facelift with hyaluronic acid fillers", &["fillers", "non-surgical", "rejuvenation"], 278, 1650, date(2024, 1, 25)),
        item(5, GalleryCategory::Body, "CoolSculpting", "Female, 32", "Abdominal contouring - 2 inch reduction", &["body", "contouring", "non-invasive"], 156, 890, date(2024, 2, 15)),
        item(6, GalleryCategory::Skincare, "Chemical Peel", "Male, 29", "TCA peel for acne scarring and texture improvement", &["peel", "skincare", "texture"], 145, 720, date(2024, 3, 5)),
        item(7, GalleryCategory::Acne, "Accutane Therapy", "Male, 24", "Severe cystic acne clearance with isotretinoin", &["acne", "medication", "severe"], 198, 1100, date(2024, 1, 30)),
        item(8, GalleryCategory::Hair, "PRP Therapy", "Female, 31", "Hair density improvement after 4 PRP sessions", &["hair", "prp", "non-surgical"], 167, 850, date(2024, 2, 28)),
    ]
}

pub(crate) fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: RecordId(1),
            name: "Dr. Sarah Johnson".into(),
            title: "Medical Director & Board-Certified Dermatologist".into(),
            specialty: "Medical & Cosmetic Dermatology".into(),
            experience: "15+ years".into(),
            rating: 4.9,
            reviews: 234,
            price: 350,
            availability: strings(&["Monday", "Tuesday", "Wednesday", "Thursday"]),
        },
        Doctor {
            id: RecordId(2),
            name: "Dr. Michael Chen".into(),
            title: "Hair Restoration Specialist".into(),
            specialty: "Hair Transplant & Restoration".into(),
            experience: "12+ years".into(),
            rating: 4.8,
            reviews: 189,
            price: 400,
            availability: strings(&["Tuesday", "Wednesday", "Friday", "Saturday"]),
        },
        Doctor {
            id: RecordId(3),
            name: "Dr. Emily Rodriguez".into(),
            title: "Laser & Aesthetic Medicine Specialist".into(),
            specialty: "Laser Treatments & Non-Invasive Procedures".into(),
            experience: "10+ years".into(),
            rating: 4.9,
            reviews: 312,
            price: 300,
            availability: strings(&["Monday", "Thursday", "Friday", "Saturday"]),
        },
    ]
}

pub(crate) fn services() -> Vec<Service> {
    let service = |id: u32, category: &str, name: &str, duration_minutes: u32, price: u32, description: &str| Service {
        id: RecordId(id),
        category: category.into(),
        name: name.into(),
        duration_minutes,
        price,
        description: description.into(),
    };

    vec![
        service(1, "dermatology", "General Dermatology Consultation", 30, 200, "Comprehensive skin examination and consultation"),
        service(2, "dermatology", "Acne Treatment Consultation", 45, 250, "Specialized consultation for acne management"),
        service(3, "hair", "Hair Restoration Consultation", 60, 300, "Complete hair loss evaluation and treatment planning"),
        service(4, "laser", "Laser Treatment Consultation", 30, 150, "Assessment for laser procedures and compatibility"),
        service(5, "injectables", "Injectables Consultation", 30, 100, "Consultation for Botox, fillers, and other injectables"),
        service(6, "body", "Body Contouring Consultation", 45, 200, "Evaluation for non-surgical body contouring treatments"),
    ]
}

pub(crate) fn treatments() -> Vec<Treatment> {
    let treatment = |slug: &str, name: &str, description: &str, highlights: &[&str], starting_price: u32| Treatment {
        slug: slug.into(),
        name: name.into(),
        description: description.into(),
        highlights: strings(highlights),
        starting_price,
    };

    vec![
        treatment("dermatology", "Medical Dermatology", "Diagnosis and treatment of skin, hair and nail conditions.", &["Skin cancer screening", "Eczema & psoriasis", "Mole evaluation"], 200),
        treatment("hair-restoration", "Hair Restoration", "Surgical and non-surgical solutions for hair loss.", &["FUE transplant", "PRP therapy", "Scalp micropigmentation"], 300),
        treatment("laser", "Laser Treatments", "Resurfacing, pigmentation and vascular lasers.", &["CO2 resurfacing", "IPL photofacial", "Laser hair removal"], 150),
        treatment("injectables", "Injectables", "Neuromodulators and dermal fillers for natural results.", &["Botox", "Hyaluronic fillers", "Sculptra"], 100),
        treatment("body-contouring", "Body Contouring", "Non-invasive fat reduction and muscle toning.", &["CoolSculpting", "EMSCULPT", "Radiofrequency tightening"], 200),
        treatment("skincare", "Medical Skincare", "Peels, facials and prescription skincare plans.", &["Chemical peels", "HydraFacial", "Custom regimens"], 120),
    ]
}

pub(crate) fn clinic() -> ClinicInfo {
    ClinicInfo {
        name: "Dr. Dermatology & Aesthetic Centre".into(),
        description: "Board-certified dermatology and aesthetic medicine in Beverly Hills.".into(),
        phone: "+1 (555) 123-4567".into(),
        email: "info@drdermatology.com".into(),
        whatsapp: "15551234567".into(),
        address: PostalAddress {
            street: "123 Medical Center Dr, Suite 100".into(),
            locality: "Beverly Hills".into(),
            region: "CA".into(),
            postal_code: "90210".into(),
            country: "US".into(),
        },
        latitude: "34.0736".into(),
        longitude: "-118.4004".into(),
        opening_hours: strings(&["Mo-Fr 09:00-18:00", "Sa 09:00-14:00"]),
        price_range: "$$$".into(),
    }
}

pub(crate) fn departments() -> Vec<Department> {
    let department = |name: &str, email: &str, phone: &str, description: &str| Department {
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        description: description.into(),
    };

    vec![
        department("New Appointments", "appointments@drdermatology.com", "+1 (555) 123-4568", "Schedule your first consultation"),
        department("Billing & Insurance", "billing@drdermatology.com", "+1 (555) 123-4569", "Payment and insurance questions"),
        department("Medical Records", "records@drdermatology.com", "+1 (555) 123-4570", "Request your medical records"),
        department("Emergency", "emergency@drdermatology.com", "+1 (555) 911-HELP", "Urgent medical concerns"),
    ]
}

pub(crate) fn faqs() -> Vec<Faq> {
    let faq = |question: &str, answer: &str| Faq {
        question: question.into(),
        answer: answer.into(),
    };

    vec![
        faq("How do I schedule an appointment?", "You can schedule online through our booking system, call us directly, or use WhatsApp for quick scheduling."),
        faq("What insurance do you accept?", "We accept most major insurance plans. Please contact our billing department to verify your coverage."),
        faq("Do you offer virtual consultations?", "Yes, we offer telemedicine consultations for certain conditions and follow-up appointments."),
        faq("What should I bring to my appointment?", "Please bring your ID, insurance card, list of medications, and any relevant medical records."),
    ]
}
