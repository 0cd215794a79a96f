use chrono::{Duration, Utc};
use clap::Parser;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use tasknest::{
    auth::AuthService,
    domain::{
        pricing, Booking, BookingStatus, CreateServiceRequest, CreateWorkerRequest, NewUser,
        Payment, PaymentStatus, ServiceType, UpdateBookingRequest, UpdateWorkerRequest, UserRole,
        WorkerStatus,
    },
    repository::{
        BookingRepository, PaymentRepository, ServiceRepository, SqliteBookingRepository,
        SqlitePaymentRepository, SqliteServiceRepository, SqliteUserRepository,
        SqliteWorkerRepository, UserRepository, WorkerRepository,
    },
};

#[derive(Parser)]
#[command(about = "Seed the TaskNest database with the service catalog and admin account")]
struct Args {
    /// Also create demo customers, workers, and bookings
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:tasknest.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let user_repo = SqliteUserRepository::new(db_pool.clone());
    let service_repo = SqliteServiceRepository::new(db_pool.clone());
    let worker_repo = SqliteWorkerRepository::new(db_pool.clone());
    let booking_repo = SqliteBookingRepository::new(db_pool.clone());
    let payment_repo = SqlitePaymentRepository::new(db_pool.clone());

    // Admin account
    println!("👤 Creating admin user...");
    let admin = match user_repo.find_by_email("admin@tasknest.com").await? {
        Some(existing) => existing,
        None => {
            user_repo
                .create(NewUser {
                    name: "Admin User".to_string(),
                    email: "admin@tasknest.com".to_string(),
                    password_hash: AuthService::hash_password("admin123")?,
                    phone: None,
                    address: None,
                    city: Some("Delhi".to_string()),
                    role: UserRole::Admin,
                })
                .await?
        }
    };
    println!("  ✅ Admin user ready: {}", admin.email);

    // Service catalog, keyed by type so re-running refreshes in place
    println!("🛠  Upserting service catalog...");
    for service in catalog() {
        let created = service_repo.upsert_by_type(service).await?;
        println!("  ✅ Service ready: {}", created.name);
    }

    if args.demo {
        seed_demo_data(
            &user_repo,
            &service_repo,
            &worker_repo,
            &booking_repo,
            &payment_repo,
        )
        .await?;
    }

    println!("🎉 Database seeding completed!");
    println!("\n📝 Admin credentials:");
    println!("   Email: admin@tasknest.com");
    println!("   Password: admin123");

    Ok(())
}

fn catalog() -> Vec<CreateServiceRequest> {
    vec![
        CreateServiceRequest {
            name: "Home-style Cooking".to_string(),
            service_type: ServiceType::HomeCooking,
            starting_price: 150.0,
            description: "Professional chef prepares daily meals at your home".to_string(),
            long_description: Some(
                "Our experienced chefs will visit your home to prepare fresh, customized meals. \
                 Perfect for busy families wanting home-cooked food without the hassle."
                    .to_string(),
            ),
            included: Some(vec![
                "Professional chef visit".to_string(),
                "Menu planning consultation".to_string(),
                "Meal preparation".to_string(),
                "Kitchen cleanup".to_string(),
                "Food storage guidance".to_string(),
            ]),
            excluded: Some(vec![
                "Grocery shopping (available as add-on)".to_string(),
                "Serving staff".to_string(),
                "Tableware and cutlery".to_string(),
            ]),
            image: None,
        },
        CreateServiceRequest {
            name: "Event Cooking".to_string(),
            service_type: ServiceType::EventCooking,
            starting_price: 100.0,
            description: "Private chef for 7–15 guest events".to_string(),
            long_description: Some(
                "Professional catering service for your private events. We handle food \
                 preparation, service, and cleanup for intimate gatherings."
                    .to_string(),
            ),
            included: Some(vec![
                "Multi-course menu planning".to_string(),
                "Professional chef and assistant".to_string(),
                "Food preparation and cooking".to_string(),
                "Plating and presentation".to_string(),
                "Full cleanup service".to_string(),
            ]),
            excluded: Some(vec![
                "Tableware and decorations".to_string(),
                "Beverages".to_string(),
                "Venue rental".to_string(),
            ]),
            image: None,
        },
        CreateServiceRequest {
            name: "Home Organization & Reset".to_string(),
            service_type: ServiceType::HomeOrganization,
            starting_price: 200.0,
            description: "Professional organizers transform your living space".to_string(),
            long_description: Some(
                "Expert organizing service to declutter, reorganize, and optimize your home. \
                 We help you create a functional and beautiful living space."
                    .to_string(),
            ),
            included: Some(vec![
                "Initial consultation".to_string(),
                "Space assessment".to_string(),
                "Decluttering assistance".to_string(),
                "Organization system design".to_string(),
                "Implementation and setup".to_string(),
                "Maintenance tips".to_string(),
            ]),
            excluded: Some(vec![
                "Storage containers (can be purchased)".to_string(),
                "Furniture or fixtures".to_string(),
                "Waste disposal fees".to_string(),
            ]),
            image: None,
        },
        CreateServiceRequest {
            name: "Seasonal / Event Concierge".to_string(),
            service_type: ServiceType::SeasonalConcierge,
            starting_price: 500.0,
            description: "Complete event planning and coordination".to_string(),
            long_description: Some(
                "Full concierge service for seasonal celebrations and special events. From \
                 planning to execution, we handle every detail."
                    .to_string(),
            ),
            included: Some(vec![
                "Event planning consultation".to_string(),
                "Vendor coordination".to_string(),
                "Timeline management".to_string(),
                "Day-of coordination".to_string(),
                "Setup and breakdown".to_string(),
            ]),
            excluded: Some(vec![
                "Vendor fees".to_string(),
                "Venue costs".to_string(),
                "Decorations and supplies".to_string(),
            ]),
            image: None,
        },
        CreateServiceRequest {
            name: "Custom Cooking Card".to_string(),
            service_type: ServiceType::CustomCooking,
            starting_price: 100.0,
            description: "Meal prep and specialized diet cooking".to_string(),
            long_description: Some(
                "Customized meal preparation tailored to your dietary needs. Whether keto, \
                 vegan, or specific health requirements, we prepare meals perfectly suited to \
                 you."
                    .to_string(),
            ),
            included: Some(vec![
                "Nutritional consultation".to_string(),
                "Custom menu planning".to_string(),
                "Special diet expertise".to_string(),
                "Meal preparation".to_string(),
                "Portion control and labeling".to_string(),
                "Storage instructions".to_string(),
            ]),
            excluded: Some(vec![
                "Specialty ingredients (charged separately)".to_string(),
                "Nutritionist consultation".to_string(),
                "Delivery service".to_string(),
            ]),
            image: None,
        },
    ]
}

async fn seed_demo_data(
    user_repo: &SqliteUserRepository,
    service_repo: &SqliteServiceRepository,
    worker_repo: &SqliteWorkerRepository,
    booking_repo: &SqliteBookingRepository,
    payment_repo: &SqlitePaymentRepository,
) -> anyhow::Result<()> {
    println!("👥 Creating demo customers...");
    let mut customers = Vec::new();
    for _ in 0..3 {
        let customer = user_repo
            .create(NewUser {
                name: Name().fake(),
                email: SafeEmail().fake(),
                password_hash: AuthService::hash_password("password123")?,
                phone: Some(PhoneNumber().fake()),
                address: Some("12 Demo Street, Rohini, Delhi".to_string()),
                city: Some("Delhi".to_string()),
                role: UserRole::Customer,
            })
            .await?;
        customers.push(customer);
    }
    println!("  ✅ Created {} demo customers", customers.len());

    println!("🧑‍🍳 Creating demo workers...");
    let chef = worker_repo
        .create(CreateWorkerRequest {
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: PhoneNumber().fake(),
            service_types: vec![ServiceType::HomeCooking, ServiceType::CustomCooking],
            hourly_rate: 180.0,
            bio: Some("Seasoned home chef specializing in north Indian cuisine".to_string()),
            experience_years: Some(6),
        })
        .await?;

    // Workers are created INACTIVE; activate the chef so it can be assigned
    let chef = worker_repo
        .update(
            chef.id,
            UpdateWorkerRequest {
                status: Some(WorkerStatus::Active),
                ..Default::default()
            },
        )
        .await?;

    // Leave a second worker inactive, pending review
    worker_repo
        .create(CreateWorkerRequest {
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: PhoneNumber().fake(),
            service_types: vec![ServiceType::HomeOrganization],
            hourly_rate: 220.0,
            bio: None,
            experience_years: Some(2),
        })
        .await?;
    println!("  ✅ Created 2 demo workers");

    println!("📅 Creating demo bookings...");
    let home_cooking = service_repo
        .find_by_type(ServiceType::HomeCooking)
        .await?
        .ok_or_else(|| anyhow::anyhow!("home cooking service missing from catalog"))?;

    let now = Utc::now();
    for (i, customer) in customers.iter().enumerate() {
        let duration_hours = 2 + i as i64;
        let quote = pricing::quote(
            home_cooking.service_type,
            home_cooking.starting_price,
            duration_hours,
            None,
        );

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: customer.id,
            service_id: home_cooking.id,
            worker_id: None,
            scheduled_at: now + Duration::days(3 + i as i64),
            duration_hours,
            guest_count: None,
            address: customer
                .address
                .clone()
                .unwrap_or_else(|| "12 Demo Street, Rohini, Delhi".to_string()),
            notes: None,
            base_price: quote.base_price,
            final_price: quote.final_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            user_id: customer.id,
            amount: quote.final_price,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        booking_repo.create_with_payment(&booking, &payment).await?;

        // First demo booking gets the active chef and a settled payment
        if i == 0 {
            booking_repo
                .update(
                    booking.id,
                    &UpdateBookingRequest {
                        status: Some(BookingStatus::Confirmed),
                        worker_id: Some(Some(chef.id)),
                    },
                )
                .await?;
            payment_repo
                .update_status(payment.id, PaymentStatus::Completed)
                .await?;
        }
    }
    println!("  ✅ Created {} demo bookings", customers.len());

    Ok(())
}
