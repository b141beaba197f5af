mod encryption_tests;
