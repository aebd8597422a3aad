mod performance_service_tests;
